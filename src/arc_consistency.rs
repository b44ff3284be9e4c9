use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, trace};

use crate::crossword::Crossword;
use crate::domains::Domains;
use crate::types::{ArcPair, VariableId, WordId};

/// Data structure used in `ac3` to track which arcs we still need to revise. An arc that's already
/// waiting in the queue isn't added a second time.
#[derive(Debug)]
struct ArcQueue {
    queue: VecDeque<ArcPair>,
    queued: HashSet<ArcPair>,
}

impl ArcQueue {
    fn with_initial_queue<Items>(items: Items) -> ArcQueue
    where
        Items: IntoIterator<Item = ArcPair>,
    {
        let mut queue = ArcQueue { queue: VecDeque::new(), queued: HashSet::new() };
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn pop_front(&mut self) -> Option<ArcPair> {
        let arc = self.queue.pop_front()?;
        self.queued.remove(&arc);
        Some(arc)
    }

    fn enqueue(&mut self, arc: ArcPair) {
        if self.queued.insert(arc) {
            self.queue.push_back(arc);
        }
    }
}

/// Make `x` arc-consistent with `y`: remove every word from `x`'s domain that has no distinct
/// word in `y`'s domain with the same letter in their shared cell. Returns true iff `x`'s domain
/// changed. Variables that don't cross are left alone.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: VariableId, y: VariableId) -> bool {
    let (cell, other_cell) = match crossword.overlap(x, y) {
        Some(overlap) => overlap,
        None => return false,
    };
    let vocabulary = crossword.vocabulary();

    // How many of `y`'s options place each glyph in the shared cell?
    let mut glyph_counts: HashMap<char, usize> = HashMap::new();
    for word_id in domains.iter(y) {
        if let Some(&glyph) = vocabulary.word(word_id).glyphs.get(other_cell) {
            *glyph_counts.entry(glyph).or_insert(0) += 1;
        }
    }

    let before = domains.get(x).clone();

    let unsupported: Vec<WordId> = before
        .iter()
        .filter(|&word_id| {
            let word = vocabulary.word(word_id);
            let glyph = match word.glyphs.get(cell) {
                Some(&glyph) => glyph,
                None => return true,
            };

            // The same word can't support itself, so if `y` could also hold this word and it
            // would put the same glyph in the shared cell, it doesn't count.
            let self_support = domains.contains(y, word_id)
                && word.glyphs.get(other_cell) == Some(&glyph);

            let support = glyph_counts.get(&glyph).copied().unwrap_or(0);
            support <= usize::from(self_support)
        })
        .collect();

    for word_id in unsupported {
        domains.remove(x, word_id);
    }

    let revised = *domains.get(x) != before;
    if revised {
        trace!(
            "Revised {} against {}: {} -> {} options",
            crossword.variable(x),
            crossword.variable(y),
            before.len(),
            domains.len(x),
        );
    }
    revised
}

/// Make the domains arc-consistent using AC-3. If `arcs` is `None`, start from every arc in the
/// puzzle; otherwise just those. `Some(&[])` means there is nothing to revise: the domains are
/// left alone and the result is true. Returns false as soon as any domain becomes empty, and true
/// once there's nothing left to revise.
pub fn ac3(
    crossword: &Crossword,
    domains: &mut Domains,
    arcs: Option<&[ArcPair]>,
) -> bool {
    let mut queue = match arcs {
        Some(arcs) => ArcQueue::with_initial_queue(arcs.iter().copied()),
        None => ArcQueue::with_initial_queue((0..crossword.variables().len()).flat_map(move |x| {
            crossword.neighbors(x).map(move |y| (x, y))
        })),
    };

    let mut revisions: usize = 0;

    while let Some((x, y)) = queue.pop_front() {
        if !revise(crossword, domains, x, y) {
            continue;
        }
        revisions += 1;

        if domains.is_empty(x) {
            debug!(
                "Arc consistency emptied the domain of {} after {} revisions",
                crossword.variable(x),
                revisions,
            );
            return false;
        }

        // `x` lost options, so each of its other neighbors may have lost support.
        for z in crossword.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    debug!("Arc consistency reached a fixed point after {} revisions", revisions);
    true
}
