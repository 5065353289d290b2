pub mod aggregator;
pub mod collectors;
pub mod envelope;
pub mod fallback;
pub mod filter;
pub mod gather;
pub mod stages;

pub use crate::domain::model::{
    Association, CollectionResult, GolfCourse, PlayerInfo, SampleMember, StageOrder, Tournament,
};
pub use crate::domain::ports::{ConfigProvider, GolfCourseSource, PlayerSource, TournamentSource};
pub use crate::utils::error::Result;
