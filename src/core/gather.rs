use crate::domain::model::CollectionResult;
use crate::utils::error::Result;
use futures::future::join_all;
use std::future::Future;

/// 來源失敗時的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// 任一來源失敗即整組改用備援資料
    AllOrNothing,
    /// 保留成功的來源，失敗記為錯誤字串；全數失敗才改用備援資料
    PartialWithErrors,
    /// 不使用備援資料，直接回傳第一個錯誤
    None,
}

/// 單一來源的收集結果
#[derive(Debug)]
pub struct Gathered<T> {
    pub label: String,
    pub outcome: Result<Vec<T>>,
}

impl<T> Gathered<T> {
    pub fn new(label: impl Into<String>, outcome: Result<Vec<T>>) -> Self {
        Self {
            label: label.into(),
            outcome,
        }
    }
}

/// 同時執行所有來源並等待全部完成，結果順序與輸入一致
pub async fn gather<T, F, I>(sources: I) -> Vec<Gathered<T>>
where
    I: IntoIterator<Item = (String, F)>,
    F: Future<Output = Result<Vec<T>>>,
{
    let (labels, futures): (Vec<String>, Vec<F>) = sources.into_iter().unzip();
    let outcomes = join_all(futures).await;

    labels
        .into_iter()
        .zip(outcomes)
        .map(|(label, outcome)| Gathered::new(label, outcome))
        .collect()
}

/// 依策略把收集結果歸併為單一 `CollectionResult`
///
/// `fallback` 只在需要時才會被呼叫；它本身的錯誤會直接往外傳。
pub fn resolve<T, F>(
    policy: FallbackPolicy,
    gathered: Vec<Gathered<T>>,
    fallback: F,
) -> Result<CollectionResult<T>>
where
    F: FnOnce() -> Result<Vec<T>>,
{
    match policy {
        FallbackPolicy::AllOrNothing => {
            let mut labels = Vec::with_capacity(gathered.len());
            let mut items = Vec::new();
            let mut errors = Vec::new();

            for g in gathered {
                match g.outcome {
                    Ok(list) => {
                        items.extend(list);
                        labels.push(g.label);
                    }
                    Err(e) => errors.push(format!("{}: {}", g.label, e)),
                }
            }

            if errors.is_empty() {
                Ok(CollectionResult::live(items, live_tag(&labels)))
            } else {
                tracing::warn!(
                    "⚠️ {} source(s) failed, discarding {} live record(s) and using fallback data",
                    errors.len(),
                    items.len()
                );
                Ok(CollectionResult::fallback(fallback()?, errors))
            }
        }
        FallbackPolicy::PartialWithErrors => {
            let mut labels = Vec::new();
            let mut items = Vec::new();
            let mut errors = Vec::new();

            for g in gathered {
                match g.outcome {
                    Ok(list) => {
                        items.extend(list);
                        labels.push(g.label);
                    }
                    Err(e) => {
                        tracing::debug!("Source {} failed: {}", g.label, e);
                        errors.push(format!("{}: {}", g.label, e));
                    }
                }
            }

            if items.is_empty() {
                tracing::warn!(
                    "⚠️ No records collected ({} error(s)), using fallback data",
                    errors.len()
                );
                Ok(CollectionResult::fallback(fallback()?, errors))
            } else {
                Ok(CollectionResult::live(items, live_tag(&labels)).with_errors(errors))
            }
        }
        FallbackPolicy::None => {
            let mut labels = Vec::with_capacity(gathered.len());
            let mut items = Vec::new();

            for g in gathered {
                match g.outcome {
                    Ok(list) => {
                        items.extend(list);
                        labels.push(g.label);
                    }
                    Err(e) => return Err(e),
                }
            }

            Ok(CollectionResult::live(items, live_tag(&labels)))
        }
    }
}

fn live_tag(labels: &[String]) -> String {
    format!("live:{}", labels.join("+"))
}
