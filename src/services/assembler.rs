use crate::models::trip::TripPlan;

/// Result of merging chunked generation calls. `failed_chunks` counts the
/// day-ranges whose replies never produced a usable plan; their days are
/// simply absent from the merged itinerary.
#[derive(Debug)]
pub struct MergeOutcome {
    pub plan: Option<TripPlan>,
    pub failed_chunks: usize,
}

/// Merges per-chunk plans into one: scalar fields and hotels come from the
/// first successful chunk, itinerary day arrays are concatenated in call
/// order. No renumbering or de-duplication is performed.
pub fn merge_chunks(chunks: Vec<Option<TripPlan>>) -> MergeOutcome {
    let failed_chunks = chunks.iter().filter(|c| c.is_none()).count();
    if failed_chunks > 0 {
        log::warn!(
            "{} of {} itinerary chunks failed; their days are dropped",
            failed_chunks,
            chunks.len()
        );
    }

    let mut merged: Option<TripPlan> = None;
    for chunk in chunks.into_iter().flatten() {
        match merged.as_mut() {
            None => merged = Some(chunk),
            Some(plan) => plan.itinerary.extend(chunk.itinerary),
        }
    }

    MergeOutcome {
        plan: merged,
        failed_chunks,
    }
}
