use crate::core::fallback::FallbackData;
use crate::core::gather::{gather, resolve, FallbackPolicy, Gathered};
use crate::domain::model::{CollectionResult, GolfCourse, PlayerInfo, SampleMember, Tournament};
use crate::domain::ports::{GolfCourseSource, PlayerSource, TournamentSource};
use crate::utils::error::Result;
use std::sync::Arc;

pub struct TournamentCollector {
    source: Arc<dyn TournamentSource>,
    fallback: FallbackData,
}

impl TournamentCollector {
    pub fn new(source: Arc<dyn TournamentSource>, fallback: FallbackData) -> Self {
        Self { source, fallback }
    }

    /// 同時抓取每個協會的賽事，依策略歸併
    pub async fn collect(&self, policy: FallbackPolicy) -> Result<CollectionResult<Tournament>> {
        let associations = self.source.associations();
        tracing::debug!("📡 Fetching tournaments for {} association(s)", associations.len());

        let gathered = gather(associations.into_iter().map(|association| {
            let source = Arc::clone(&self.source);
            (association.to_string(), async move { source.fetch(association).await })
        }))
        .await;

        // 不論成功與否都先釋放來源資源
        self.source.release().await;

        let result = resolve(policy, gathered, || self.fallback.tournaments())?;
        tracing::info!(
            "🏆 Tournaments collected: {} (fallback: {})",
            result.total,
            result.is_fallback
        );
        Ok(result)
    }

    pub fn collect_fallback(&self) -> Result<CollectionResult<Tournament>> {
        Ok(CollectionResult::fallback(self.fallback.tournaments()?, Vec::new()))
    }
}

pub struct GolfCourseCollector {
    source: Arc<dyn GolfCourseSource>,
    fallback: FallbackData,
}

impl GolfCourseCollector {
    pub fn new(source: Arc<dyn GolfCourseSource>, fallback: FallbackData) -> Self {
        Self { source, fallback }
    }

    pub async fn collect(&self, policy: FallbackPolicy) -> Result<CollectionResult<GolfCourse>> {
        let outcome = self.source.fetch_all().await;
        let result = resolve(
            policy,
            vec![Gathered::new("golf-courses", outcome)],
            || self.fallback.golf_courses(),
        )?;

        tracing::info!(
            "⛳ Golf courses collected: {} (fallback: {})",
            result.total,
            result.is_fallback
        );
        Ok(result)
    }

    pub fn collect_fallback(&self) -> Result<CollectionResult<GolfCourse>> {
        Ok(CollectionResult::fallback(self.fallback.golf_courses()?, Vec::new()))
    }
}

pub struct PlayerCollector {
    source: Arc<dyn PlayerSource>,
    fallback: FallbackData,
    members: Vec<SampleMember>,
}

impl PlayerCollector {
    pub fn new(source: Arc<dyn PlayerSource>, fallback: FallbackData, members: Vec<SampleMember>) -> Self {
        Self {
            source,
            fallback,
            members,
        }
    }

    /// 逐一查詢樣本會員；單筆失敗不影響其餘查詢
    pub async fn collect(&self, policy: FallbackPolicy) -> Result<CollectionResult<PlayerInfo>> {
        let mut gathered = Vec::with_capacity(self.members.len());

        for (index, member) in self.members.iter().enumerate() {
            tracing::debug!(
                "📡 Player lookup {}/{}: {} ({})",
                index + 1,
                self.members.len(),
                member.id,
                member.association
            );
            let outcome = self.source.lookup(member).await.map(|player| vec![player]);
            gathered.push(Gathered::new(member.id.clone(), outcome));
        }

        let result = resolve(policy, gathered, || self.fallback.players())?;
        tracing::info!(
            "🏌️ Players collected: {} (fallback: {}, errors: {})",
            result.total,
            result.is_fallback,
            result.errors.len()
        );
        Ok(result)
    }

    pub fn collect_fallback(&self) -> Result<CollectionResult<PlayerInfo>> {
        Ok(CollectionResult::fallback(self.fallback.players()?, Vec::new()))
    }
}
