mod question;
mod score;
mod session;
mod view;

pub use question::{BankError, Question, QuestionId, QuizBank};
pub use score::{Score, Tier};
pub use session::{QuizSession, Rejection, ReviewEntry};
pub use view::{QuestionView, QuizInfo, ReviewItem, SessionView};

#[cfg(test)]
pub(crate) use question::sample_question;
