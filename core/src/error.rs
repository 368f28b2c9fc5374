use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board height and width must both be at least 1")]
    InvalidDimensions,
    #[error("Mine count must be lower than the number of tiles")]
    InvalidMineCount,
    #[error("Coordinates are outside of the board")]
    OutOfBounds,
    #[error("Not enough tiles outside the starting area to place every mine")]
    InsufficientSpace,
    #[error("No winnable board found after {attempts} attempts")]
    UngenerableBoard { attempts: u32 },
    #[error("Generated layout has the wrong mine count or mines in the starting area")]
    InvalidMineLayout,
    #[error("Board layout rows are empty or of unequal length")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
