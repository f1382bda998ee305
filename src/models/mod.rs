pub mod category;
pub mod clock;
pub mod moment;
pub mod period;
pub mod reminder;
pub mod schedule;
pub mod settings;

pub use category::*;
pub use clock::*;
pub use moment::*;
pub use period::*;
pub use reminder::*;
pub use schedule::*;
pub use settings::*;
