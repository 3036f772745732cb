//! Random board generation.
//!
//! Placement draws distinct cells without replacement, so it always
//! terminates once [`check_capacity`] has accepted the parameters.

use burrow_core::{Board, Cell, Coord};
use rand::Rng;
use rand::seq::index;

use crate::config::{SetupError, check_capacity};

/// Generate a `size`×`size` board holding the rabbit, `holes` rabbit holes
/// and `carrots` carrots on distinct cells.
///
/// The rabbit lands on a uniformly random cell, then each hole and each
/// carrot on a uniformly random cell that is still a pathway. Returns the
/// board and the rabbit's coordinate.
pub fn initialize<R: Rng + ?Sized>(
    size: u32,
    carrots: u32,
    holes: u32,
    rng: &mut R,
) -> Result<(Board, Coord), SetupError> {
    check_capacity(size, carrots, holes)?;

    let mut board = Board::new(size as i32);
    let cells: Vec<Coord> = board.bounds().iter().collect();
    let amount = 1 + holes as usize + carrots as usize;

    // `sample` returns the indices in random order: the first goes to the
    // rabbit, the next `holes` to holes, the rest to carrots.
    let mut picks = index::sample(rng, cells.len(), amount)
        .into_iter()
        .map(|i| cells[i]);

    let Some(rabbit) = picks.next() else {
        return Err(SetupError::InitializationImpossible {
            size,
            carrots,
            holes,
        });
    };
    board.set(rabbit, Cell::RabbitPlain);
    for c in picks.by_ref().take(holes as usize) {
        board.set(c, Cell::RabbitHole);
    }
    for c in picks {
        board.set(c, Cell::Carrot);
    }

    log::debug!("placed rabbit at {rabbit}, {holes} holes, {carrots} carrots on {size}x{size}");
    Ok((board, rabbit))
}
