/// A token color. `Blank` is the sentinel that marks a crushed cell waiting
/// for gravity; it never spawns and never participates in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Orange,
    Blue,
    Purple,
    Blank,
}

impl Color {
    /// The spawnable palette, in spawn-index order. `Blank` is excluded.
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Orange,
        Color::Blue,
        Color::Purple,
    ];

    pub fn is_blank(self) -> bool {
        self == Color::Blank
    }

    /// Draw a random color from the first `num_colors` palette entries.
    pub fn random<R: rand::Rng>(rng: &mut R, num_colors: usize) -> Color {
        let n = num_colors.clamp(2, Self::PALETTE.len());
        Self::PALETTE[rng.random_range(0..n)]
    }

    /// One-character tag used by the board's text rendering.
    pub fn tag(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Purple => 'P',
            Color::Blank => '.',
        }
    }
}

/// Unique per-board token identifier. Ids count up from zero and are never
/// reused, so renderers can track a token across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub u32);

/// A single token on the board. Identity is immutable; color and position
/// change as the token is crushed or slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    id: TokenId,
    color: Color,
    position: Option<(usize, usize)>,
}

impl Token {
    pub(crate) fn new(id: TokenId, color: Color) -> Self {
        Token {
            id,
            color,
            position: None,
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// `(row, col)` while the token sits on a board, `None` once removed.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn set_position(&mut self, position: Option<(usize, usize)>) {
        self.position = position;
    }
}
