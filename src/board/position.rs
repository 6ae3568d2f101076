/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::BTreeMap, fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use crate::{Color, Piece, PieceKind, Square, BACK_RANK, BOARD_SIZE};

/// What moved on the most recent turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Mover {
    /// A single piece moved. Holds the piece's kind *after* the move, so a promoted Pawn reports its new kind.
    Piece(PieceKind),

    /// The King and a Rook castled.
    Castle,
}

/// Context about the most recent move, used to detect en passant.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct LastMove {
    mover: Mover,
    from: Square,
    to: Square,
}

impl LastMove {
    /// Creates a new [`LastMove`].
    #[inline(always)]
    pub const fn new(mover: Mover, from: Square, to: Square) -> Self {
        Self { mover, from, to }
    }

    /// What moved.
    #[inline(always)]
    pub const fn mover(&self) -> Mover {
        self.mover
    }

    /// The square the move started on. For castling, this is the King's square.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square the move ended on. For castling, this is the King's square.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Returns `true` if this was a Pawn advancing two ranks in a single move.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{LastMove, Mover, PieceKind, Square};
    /// let double = LastMove::new(Mover::Piece(PieceKind::Pawn), Square::new(1, 1), Square::new(1, 3));
    /// assert!(double.is_pawn_double_step());
    ///
    /// let single = LastMove::new(Mover::Piece(PieceKind::Pawn), Square::new(1, 1), Square::new(1, 2));
    /// assert!(!single.is_pawn_double_step());
    /// ```
    #[inline(always)]
    pub const fn is_pawn_double_step(&self) -> bool {
        matches!(self.mover, Mover::Piece(PieceKind::Pawn)) && self.from.distance_ranks(self.to) == 2
    }

    /// Replaces the kind reported by this [`LastMove`], as happens when a Pawn is promoted.
    #[inline(always)]
    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.mover = Mover::Piece(kind);
    }
}

/// The state of the board: which piece stands on which square, and what moved last.
///
/// Pieces are keyed by their [`Square`], so iteration is always ordered from the
/// top-left corner of the board to the bottom-right.
///
/// A [`Position`] has no notion of whose turn it is. See [`crate::Game`] for that.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// Every piece on the board, keyed by the square it stands on.
    pieces: BTreeMap<Square, Piece>,

    /// The most recent move, if any.
    last_move: Option<LastMove>,
}

impl Position {
    /// Creates a new [`Position`] with the standard starting layout.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Position, Square, PieceKind, Color};
    /// let pos = Position::new();
    /// assert_eq!(pos.pieces().count(), 32);
    /// let king = pos.piece_at(Square::new(4, 7)).unwrap();
    /// assert_eq!(king.kind(), PieceKind::King);
    /// assert_eq!(king.color(), Color::White);
    /// assert!(pos.last_move().is_none());
    /// ```
    pub fn new() -> Self {
        let mut pos = Self::empty();

        for color in Color::all() {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                let file = file as u8;
                pos.place(Piece::new(color, kind, Square::new(file, color.back_rank())));
                pos.place(Piece::new(
                    color,
                    PieceKind::Pawn,
                    Square::new(file, color.pawn_rank()),
                ));
            }
        }

        pos
    }

    /// Creates a [`Position`] with no pieces on it.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            pieces: BTreeMap::new(),
            last_move: None,
        }
    }

    /// Creates a [`Position`] from a collection of pieces, placed on their own squares.
    ///
    /// If two pieces share a square, the latter wins.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Piece, PieceKind, Position, Square};
    /// let pos = Position::from_pieces([
    ///     Piece::new(Color::White, PieceKind::King, Square::new(4, 7)),
    ///     Piece::new(Color::Black, PieceKind::King, Square::new(4, 0)),
    /// ]);
    /// assert_eq!(pos.pieces().count(), 2);
    /// ```
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Self {
        let mut pos = Self::empty();
        for piece in pieces {
            pos.place(piece);
        }
        pos
    }

    /// Parses a [`Position`] from rows of piece letters.
    ///
    /// The text must contain exactly 8 lines, the first being rank `0` and the last being rank `7`.
    /// Each line holds up to 8 whitespace-separated tokens, file `0` first:
    /// `K Q R B N P` for White, `k q r b n p` for Black, and `-` or `.` for an empty square.
    /// Missing tokens at the end of a line, and blank lines, are empty squares.
    ///
    /// Every piece is unmoved, except for Pawns that are not on their starting rank.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Position, Square, PieceKind};
    /// let pos = Position::from_rows("- - - - k\n\n\n\n\nP\n\n- - - - K\n").unwrap();
    /// assert_eq!(pos.pieces().count(), 3);
    /// let pawn = pos.piece_at(Square::new(0, 5)).unwrap();
    /// assert_eq!(pawn.kind(), PieceKind::Pawn);
    /// assert!(pawn.has_moved());
    /// ```
    pub fn from_rows(rows: &str) -> Result<Self> {
        let lines = rows.lines().collect::<Vec<_>>();

        if lines.len() != BOARD_SIZE as usize {
            bail!(
                "Layout must have exactly {BOARD_SIZE} rows. Got {}",
                lines.len()
            );
        }

        let mut pos = Self::empty();
        let mut kings = [false; Color::COUNT];

        for (rank, line) in lines.into_iter().enumerate() {
            let tokens = line.split_ascii_whitespace().collect::<Vec<_>>();
            if tokens.len() > BOARD_SIZE as usize {
                bail!(
                    "Row {rank} must have at most {BOARD_SIZE} squares. Got {}: {line:?}",
                    tokens.len()
                );
            }

            for (file, token) in tokens.into_iter().enumerate() {
                let square = Square::new(file as u8, rank as u8);

                let mut chars = token.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    bail!("Invalid token {token:?} on {square}: expected a single character");
                };

                if c == '-' || c == '.' {
                    continue;
                }

                let mut piece = Piece::from_char(c, square)
                    .with_context(|| format!("Invalid piece on {square}"))?;

                if piece.is_king() {
                    let seen = &mut kings[piece.color() as usize];
                    if *seen {
                        bail!("Layout has more than one {} king", piece.color());
                    }
                    *seen = true;
                }

                if piece.is_pawn() && square.rank() != piece.color().pawn_rank() {
                    piece = piece.moved();
                }

                pos.place(piece);
            }
        }

        Ok(pos)
    }

    /// Returns a copy of this [`Position`] with the provided last-move context.
    #[inline(always)]
    pub fn with_last_move(mut self, last_move: LastMove) -> Self {
        self.last_move = Some(last_move);
        self
    }

    /// Fetches the most recent move, if one has been made.
    #[inline(always)]
    pub const fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    /// Replaces the most recent move.
    #[inline(always)]
    pub(crate) fn set_last_move(&mut self, last_move: LastMove) {
        self.last_move = Some(last_move);
    }

    /// Mutable access to the most recent move.
    #[inline(always)]
    pub(crate) fn last_move_mut(&mut self) -> Option<&mut LastMove> {
        self.last_move.as_mut()
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.get(&square)
    }

    /// Returns `true` if there is a piece on `square`.
    #[inline(always)]
    pub fn has(&self, square: Square) -> bool {
        self.pieces.contains_key(&square)
    }

    /// Fetches the [`Color`] of the piece on `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(Piece::color)
    }

    /// An iterator over every piece on the board, ordered by square.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.values()
    }

    /// An iterator over every piece of `color`, ordered by square.
    #[inline(always)]
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |piece| piece.color() == color)
    }

    /// Locates the King of `color`, if it is on the board.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Position, Square};
    /// let pos = Position::new();
    /// assert_eq!(pos.king_square(Color::Black), Some(Square::new(4, 0)));
    /// assert_eq!(Position::empty().king_square(Color::White), None);
    /// ```
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|piece| piece.is_king())
            .map(Piece::square)
    }

    /// Places `piece` on its own square, returning whatever stood there before.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.pieces.insert(piece.square(), piece)
    }

    /// Removes and returns the piece on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.pieces.remove(&square)
    }

    /// A plain grid of the board, indexed as `[rank][file]`, suitable for rendering.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, PieceKind, Position, Square};
    /// let grid = Position::new().snapshot();
    /// assert_eq!(grid[7][4], Some((PieceKind::King, Color::White)));
    /// assert_eq!(grid[Square::new(0, 0)], Some((PieceKind::Rook, Color::Black)));
    /// assert_eq!(grid[4][4], None);
    /// ```
    pub fn snapshot(&self) -> [[Option<(PieceKind, Color)>; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut grid = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];

        for piece in self.pieces() {
            grid[piece.square()] = Some((piece.kind(), piece.color()));
        }

        grid
    }
}

impl Default for Position {
    /// The standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    /// Wrapper for [`Position::from_rows`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s)
    }
}

impl fmt::Display for Position {
    /// Displays the board as 8 rows of space-separated piece letters, rank `0` first, with `-` for empty squares.
    ///
    /// The output can be parsed back with [`Position::from_rows`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, row) in self.snapshot().iter().enumerate() {
            let symbols = row
                .iter()
                .map(|cell| match cell {
                    Some((kind, Color::White)) => kind.char().to_ascii_uppercase(),
                    Some((kind, Color::Black)) => kind.char(),
                    None => '-',
                })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ");

            write!(f, "{symbols}")?;
            if rank + 1 < BOARD_SIZE as usize {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Position {
    /// Displays the board with coordinates, along with the last move.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..BOARD_SIZE {
            write!(f, "{rank}|")?;
            for file in 0..BOARD_SIZE {
                let piece_char = self
                    .piece_at(Square::new(file, rank))
                    .map(Piece::char)
                    .unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            if rank == 0 {
                match self.last_move() {
                    Some(last) => write!(
                        f,
                        "     Last move: {:?} {} -> {}",
                        last.mover(),
                        last.from(),
                        last.to()
                    )?,
                    None => write!(f, "     Last move: -")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in 0..BOARD_SIZE {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in 0..BOARD_SIZE {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::LAYOUT_STARTPOS;

    #[test]
    fn test_startpos_layout_matches_constructor() {
        let parsed = Position::from_rows(LAYOUT_STARTPOS).unwrap();
        assert_eq!(parsed, Position::new());
    }

    #[test]
    fn test_display_round_trips() {
        let pos = Position::new();
        let text = pos.to_string();
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().next().unwrap(), "r n b q k b n r");
        assert_eq!(text.lines().nth(4).unwrap(), "- - - - - - - -");
        assert_eq!(text.parse::<Position>().unwrap(), pos);
    }

    #[test]
    fn test_from_rows_rejects_bad_layouts() {
        // Too few rows
        assert!(Position::from_rows("k\n\n\nK\n").is_err());

        // Too many squares in a row
        let wide = "- - - - - - - - -\n\n\n\n\n\n\n\n";
        assert!(Position::from_rows(wide).is_err());

        // Unknown piece letter
        let unknown = "x\n\n\n\n\n\n\n\n";
        assert!(Position::from_rows(unknown).is_err());

        // Multi-character token
        let token = "kk\n\n\n\n\n\n\n\n";
        assert!(Position::from_rows(token).is_err());

        // Two kings of the same color
        let kings = "k - k\n\n\n\n\n\n\n\n";
        assert!(Position::from_rows(kings).is_err());
    }

    #[test]
    fn test_from_rows_marks_advanced_pawns_as_moved() {
        let pos = Position::from_rows("\n\n\n\np\n\nP - - P\n\n").unwrap();
        assert!(pos.piece_at(Square::new(0, 4)).unwrap().has_moved());
        assert!(!pos.piece_at(Square::new(0, 6)).unwrap().has_moved());
        assert!(!pos.piece_at(Square::new(3, 6)).unwrap().has_moved());
    }

    #[test]
    fn test_place_and_take() {
        let mut pos = Position::empty();
        let rook = Piece::new(Color::White, PieceKind::Rook, Square::new(0, 7));
        assert_eq!(pos.place(rook), None);
        assert!(pos.has(Square::new(0, 7)));
        assert_eq!(pos.color_at(Square::new(0, 7)), Some(Color::White));
        assert_eq!(pos.take(Square::new(0, 7)), Some(rook));
        assert!(!pos.has(Square::new(0, 7)));
    }

    #[test]
    fn test_pieces_are_ordered_by_square() {
        let pos = Position::new();
        let squares = pos.pieces().map(Piece::square).collect::<Vec<_>>();
        let mut sorted = squares.clone();
        sorted.sort();
        assert_eq!(squares, sorted);
        assert_eq!(pos.pieces_of(Color::White).count(), 16);
    }
}
