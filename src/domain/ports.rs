use crate::domain::model::{Association, GolfCourse, PlayerInfo, SampleMember, StageOrder, Tournament};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 協會賽事來源；每次請求內可能持有外部資源（瀏覽器、連線階段）
#[async_trait]
pub trait TournamentSource: Send + Sync {
    fn associations(&self) -> Vec<Association>;

    async fn fetch(&self, association: Association) -> Result<Vec<Tournament>>;

    /// 收集結束後釋放來源持有的資源
    async fn release(&self) {}
}

#[async_trait]
pub trait GolfCourseSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<GolfCourse>>;
}

#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn lookup(&self, member: &SampleMember) -> Result<PlayerInfo>;
}

pub trait ConfigProvider: Send + Sync {
    fn request_timeout(&self) -> Duration;
    fn tournament_endpoints(&self) -> Vec<(Association, Option<String>)>;
    fn golf_course_endpoints(&self) -> &[String];
    fn player_endpoint(&self) -> Option<&str>;
    fn sample_players(&self) -> &[SampleMember];
    fn default_limit(&self) -> usize;
    fn stage_order(&self) -> StageOrder;
    fn fallback_dir(&self) -> Option<&str>;
}
