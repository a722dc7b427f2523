use std::io::{self, Read, Seek, SeekFrom};

use super::Match;

/// Errors produced while reading the surroundings of a match.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("could not read match context: {0}")]
    Io(#[from] io::Error),
    #[error("could not read sufficient context data")]
    Insufficient,
    #[error("no context available")]
    NoContext,
    #[error("match data does not appear as expected")]
    Mismatch,
}

/// Widen `m` by up to `context` bytes on either side, reading from `source`.
///
/// The returned match starts at the first context byte and holds the
/// context together with the match data. Fails if the source does
/// not contain the match at its offset, or holds nothing beyond it.
pub fn string_match_context<R>(source: &mut R, context: usize, m: &Match) -> Result<Match, ContextError>
where
    R: Read + Seek,
{
    let before = context.min(m.offset);
    let start = m.offset - before;
    let wanted = before + m.len() + context;

    source.seek(SeekFrom::Start(start as u64))?;
    let mut data = Vec::with_capacity(wanted);
    source.by_ref().take(wanted as u64).read_to_end(&mut data)?;

    if data.len() < before + m.len() {
        return Err(ContextError::Insufficient);
    }
    if data.len() == m.len() {
        return Err(ContextError::NoContext);
    }
    if data[before..before + m.len()] != m.data[..] {
        return Err(ContextError::Mismatch);
    }
    Ok(Match::new(start, data))
}
