/// Births and survivals of Conway's Game of Life, packed so that bit `n` is on when a neighbour
/// count of `n` triggers the transition.
///
/// ```notrust
/// b3:  0000_0000_0000_1000
/// s23: 0000_0000_0000_1100
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
const BIRTHS: u16 = 0b1000;
const SURVIVALS: u16 = 0b1100;

/// Next state of a cell under B3/S23, given its current state and how many of its eight
/// neighbours are alive.
///
/// A live cell survives with 2 or 3 live neighbours, a dead cell is born with exactly 3. Every
/// other combination yields a dead cell.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    // anything past 8 cannot be a neighbour count
    if live_neighbors > 8 {
        return false;
    }

    let mask = 1u16 << live_neighbors;

    if alive {
        SURVIVALS & mask == mask
    } else {
        BIRTHS & mask == mask
    }
}
