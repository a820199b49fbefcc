mod insert_test;
mod projection_test;
mod remove_test;
mod update_test;
