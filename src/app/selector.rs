use rand::Rng;
use rand::seq::SliceRandom;

use super::source::Clip;
use crate::db::SeenStore;
use crate::error::{SelectError, SelectResult};

/// The clip chosen for one run and how the history was used to get there.
#[derive(Debug)]
pub(crate) struct Selection<'a> {
    pub(crate) clip: &'a Clip,
    /// Size of the pool the clip was drawn from.
    pub(crate) eligible: usize,
    /// The creator's history was cleared because every fetched clip was already seen.
    pub(crate) reset: bool,
    /// The pick was written to the store (always `false` when history is ignored).
    pub(crate) recorded: bool,
}

/// Picks one clip from `batch`, preferring clips not yet seen for `creator`.
///
/// With `ignore_history` the store is neither read nor written. Otherwise an exhausted
/// batch clears the creator's history first, and the pick is recorded afterwards. A
/// failure to record is logged and does not undo the pick.
pub(crate) fn select_clip<'a, S, R>(
    store: &S,
    creator: &str,
    display_name: &str,
    batch: &'a [Clip],
    ignore_history: bool,
    rng: &mut R,
) -> SelectResult<Selection<'a>>
where
    S: SeenStore + ?Sized,
    R: Rng + ?Sized,
{
    if batch.is_empty() {
        log::warn!("no clips found for '{display_name}'");
        return Err(SelectError::EmptyCatalog(display_name.to_string()));
    }

    let mut eligible: Vec<&Clip> = if ignore_history {
        log::info!("history ignored; all {} fetched clips are eligible", batch.len());
        batch.iter().collect()
    } else {
        let mut unseen = Vec::with_capacity(batch.len());
        for clip in batch {
            if !store.has_seen(creator, &clip.id)? {
                unseen.push(clip);
            }
        }
        log::info!(
            "{} of {} fetched clips not seen yet for '{creator}'",
            unseen.len(),
            batch.len()
        );
        unseen
    };

    let mut reset = false;
    if eligible.is_empty() {
        if !ignore_history {
            let removed = store.clear_for_creator(creator)?;
            log::warn!(
                "all clips have been seen for '{display_name}'; cleared {removed} history record(s)"
            );
            reset = true;
        }
        eligible = batch.iter().collect();
    }

    let Some(clip) = eligible.choose(rng).copied() else {
        log::error!("no usable clips for '{display_name}' even after resetting history");
        return Err(SelectError::Exhausted(display_name.to_string()));
    };
    log::info!("selected clip '{}' ({})", clip.title, clip.id);

    let recorded = if ignore_history {
        false
    } else {
        match store.mark_seen(creator, &clip.id) {
            Ok(true) => true,
            Ok(false) => {
                log::info!("clip {} was already recorded for '{creator}'", clip.id);
                true
            }
            Err(err) => {
                log::warn!("could not record clip {} as seen: {err}", clip.id);
                false
            }
        }
    };

    Ok(Selection {
        clip,
        eligible: eligible.len(),
        reset,
        recorded,
    })
}
