mod answer_set;
mod record_type;
mod response_code;

pub use answer_set::AnswerSet;
pub use record_type::RecordType;
pub use response_code::ResponseCode;
