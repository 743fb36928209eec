mod helpers;

mod admin_test;
mod cart_test;
