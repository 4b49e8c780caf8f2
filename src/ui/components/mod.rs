pub mod question_list;
pub mod range_list;
