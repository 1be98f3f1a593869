use rand::Rng;

use super::state::Position;

/// Places food on a random free cell
pub struct FoodPlacer<R: Rng> {
    rng: R,
}

impl<R: Rng> FoodPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw uniformly from the grid until a cell outside `occupied` comes up.
    ///
    /// Panics if `occupied` already covers every cell; a full board ends the
    /// game before food is needed.
    pub fn place(&mut self, columns: usize, rows: usize, occupied: &[Position]) -> Position {
        let free = (columns * rows).saturating_sub(distinct_in_grid(columns, rows, occupied));
        assert!(free > 0, "no free cell left for food on a {columns}x{rows} grid");

        loop {
            let x = self.rng.gen_range(0..columns) as i32;
            let y = self.rng.gen_range(0..rows) as i32;
            let pos = Position::new(x, y);

            if !occupied.contains(&pos) {
                return pos;
            }
        }
    }
}

fn distinct_in_grid(columns: usize, rows: usize, occupied: &[Position]) -> usize {
    let mut seen = vec![false; columns * rows];
    let mut count = 0;
    for pos in occupied {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= columns || pos.y as usize >= rows {
            continue;
        }
        let idx = pos.y as usize * columns + pos.x as usize;
        if !seen[idx] {
            seen[idx] = true;
            count += 1;
        }
    }
    count
}
