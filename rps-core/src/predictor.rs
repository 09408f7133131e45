use crate::RpsMove;

/// Below this many recorded moves the predictor always guesses rock.
pub const COLD_START_THRESHOLD: u64 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveCounts {
    rock: u64,
    paper: u64,
    scissors: u64,
}

impl MoveCounts {
    pub fn new(rock: u64, paper: u64, scissors: u64) -> Self {
        MoveCounts {
            rock,
            paper,
            scissors,
        }
    }

    pub fn get(&self, mv: RpsMove) -> u64 {
        match mv {
            RpsMove::Rock => self.rock,
            RpsMove::Paper => self.paper,
            RpsMove::Scissors => self.scissors,
            RpsMove::Undefined => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.rock + self.paper + self.scissors
    }

    /// Adds `count` occurrences of `mv`. Undefined moves are not counted.
    pub fn add(&mut self, mv: RpsMove, count: u64) {
        match mv {
            RpsMove::Rock => self.rock += count,
            RpsMove::Paper => self.paper += count,
            RpsMove::Scissors => self.scissors += count,
            RpsMove::Undefined => {}
        }
    }
}

impl FromIterator<(RpsMove, u64)> for MoveCounts {
    fn from_iter<I: IntoIterator<Item = (RpsMove, u64)>>(iter: I) -> Self {
        let mut counts = MoveCounts::default();
        for (mv, count) in iter {
            counts.add(mv, count);
        }
        counts
    }
}

/// Guesses the player's next move as the most frequent move so far.
///
/// Ties go to the first move in [`RpsMove::PLAYABLE`] order.
pub fn predict_next_move(counts: &MoveCounts) -> RpsMove {
    if counts.total() < COLD_START_THRESHOLD {
        return RpsMove::Rock;
    }

    let mut best = RpsMove::Rock;
    let mut best_count = counts.get(RpsMove::Rock);
    for mv in RpsMove::PLAYABLE {
        let count = counts.get(mv);
        if count > best_count {
            best = mv;
            best_count = count;
        }
    }
    best
}
