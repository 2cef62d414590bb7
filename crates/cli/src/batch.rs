use anyhow::{Context, Result};
use difficulty_classifier::{assess, Assessment};
use difficulty_protocol::IssueRecord;

/// A record paired with its assessment.
#[derive(Debug, Clone)]
pub(crate) struct Classified {
    pub record: IssueRecord,
    pub assessment: Assessment,
}

/// Below this many records per worker the batch runs inline.
const MIN_CHUNK: usize = 256;

/// Classify every record, preserving input order.
///
/// With `jobs > 1` the batch is split into contiguous chunks classified on
/// blocking workers; chunks are joined back in order.
pub(crate) async fn classify_batch(
    records: Vec<IssueRecord>,
    jobs: usize,
) -> Result<Vec<Classified>> {
    let jobs = jobs.max(1);
    if jobs == 1 || records.len() < MIN_CHUNK * 2 {
        return Ok(classify_chunk(records));
    }

    let chunk_size = records.len().div_ceil(jobs).max(MIN_CHUNK);
    let total = records.len();
    let mut handles = Vec::with_capacity(jobs);
    let mut rest = records;
    while !rest.is_empty() {
        let tail = rest.split_off(chunk_size.min(rest.len()));
        let chunk = std::mem::replace(&mut rest, tail);
        handles.push(tokio::task::spawn_blocking(move || classify_chunk(chunk)));
    }
    log::debug!("classifying {total} records on {} workers", handles.len());

    let mut out = Vec::with_capacity(total);
    for handle in handles {
        out.extend(handle.await.context("Classification worker failed")?);
    }
    Ok(out)
}

fn classify_chunk(records: Vec<IssueRecord>) -> Vec<Classified> {
    records
        .into_iter()
        .map(|record| {
            let assessment = assess(&record);
            Classified { record, assessment }
        })
        .collect()
}
