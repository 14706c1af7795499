mod await_all;

pub mod support;
