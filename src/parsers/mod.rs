pub mod statement;
pub mod traits;

pub mod prelude {
    pub use super::statement::prelude::*;
    pub use super::traits::Parser;
}
