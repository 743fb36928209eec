mod helpers;

mod books_test;
