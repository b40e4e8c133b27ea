mod assign;
mod insert;
mod replace;
mod swap;
