pub mod category;
pub mod progress;
pub mod question;
pub mod stats;
pub mod user;

pub use progress::{NewProgress, ProgressUpdate, UserProgress};
pub use question::{Difficulty, Question, QuestionSeed};
pub use stats::{CategoryStat, UserStats};
pub use user::{CreateUserRequest, User, UserProfile};
