mod question;
mod quiz;

pub use question::{
    Answer, AnswerDisplay, DEFAULT_ANSWER, MAX_OPTIONS, OptionLabel, Question, QuestionRecord,
};
pub use quiz::{DEFAULT_TITLE, Quiz, QuizBank};
