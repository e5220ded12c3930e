mod institution_test;
mod record_test;
mod role_test;
