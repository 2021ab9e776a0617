mod inherited_test;
mod invariants_test;
mod json_test;
mod parens_test;
mod repeat_test;
