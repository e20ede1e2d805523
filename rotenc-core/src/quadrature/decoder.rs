//! Quadrature decoder state machine
//!
//! Decodes Gray-code A/B samples with a fixed transition table. Each table
//! cell holds the next state in the low nibble and an optional direction flag
//! in the high nibble. Every state stands for one (B,A) level. A sample that
//! flips both signals relative to that level is a glitch: the cell for it
//! holds the current state, so the glitch neither steps nor disturbs how the
//! following samples decode.
//!
//! Clockwise, with the detent resting at A=1 B=1:
//!
//! ```text
//! (B,A): 11 -> 01 -> 00 -> 10 -> 11
//! ```
//!
//! Counter-clockwise is the same sequence in reverse.

/// Direction flag: clockwise step completed
const DIR_CW: u8 = 0x10;
/// Direction flag: counter-clockwise step completed
const DIR_CCW: u8 = 0x20;
/// Mask for the next-state nibble
const STATE_MASK: u8 = 0x0F;

/// Start state shared by both tables (detent, A=1 B=1)
const R_START: u8 = 0x0;

// Full step states
const F_CW_FINAL: u8 = 0x1;
const F_CW_BEGIN: u8 = 0x2;
const F_CW_NEXT: u8 = 0x3;
const F_CCW_BEGIN: u8 = 0x4;
const F_CCW_FINAL: u8 = 0x5;
const F_CCW_NEXT: u8 = 0x6;

// Half step states
const H_CCW_BEGIN: u8 = 0x1;
const H_CW_BEGIN: u8 = 0x2;
const H_START_M: u8 = 0x3;
const H_CW_BEGIN_M: u8 = 0x4;
const H_CCW_BEGIN_M: u8 = 0x5;

/// Full step table: one step per complete Gray-code cycle (one detent)
#[rustfmt::skip]
const FULL_STEP_TABLE: [[u8; 4]; 7] = [
    // 00          01            10            11                    (B,A)
    [R_START,     F_CW_BEGIN,   F_CCW_BEGIN,  R_START],              // R_START      (11)
    [F_CW_NEXT,   F_CW_FINAL,   F_CW_FINAL,   R_START | DIR_CW],     // F_CW_FINAL   (10)
    [F_CW_NEXT,   F_CW_BEGIN,   F_CW_BEGIN,   R_START],              // F_CW_BEGIN   (01)
    [F_CW_NEXT,   F_CW_BEGIN,   F_CW_FINAL,   F_CW_NEXT],            // F_CW_NEXT    (00)
    [F_CCW_NEXT,  F_CCW_BEGIN,  F_CCW_BEGIN,  R_START],              // F_CCW_BEGIN  (10)
    [F_CCW_NEXT,  F_CCW_FINAL,  F_CCW_FINAL,  R_START | DIR_CCW],    // F_CCW_FINAL  (01)
    [F_CCW_NEXT,  F_CCW_FINAL,  F_CCW_BEGIN,  F_CCW_NEXT],           // F_CCW_NEXT   (00)
];

/// Half step table: one step at 00 and one at 11, two per detent
#[rustfmt::skip]
const HALF_STEP_TABLE: [[u8; 4]; 6] = [
    // 00                      01              10             11                   (B,A)
    [R_START,                 H_CW_BEGIN,     H_CCW_BEGIN,   R_START],             // R_START       (11)
    [H_START_M | DIR_CCW,     H_CCW_BEGIN,    H_CCW_BEGIN,   R_START],             // H_CCW_BEGIN   (10)
    [H_START_M | DIR_CW,      H_CW_BEGIN,     H_CW_BEGIN,    R_START],             // H_CW_BEGIN    (01)
    [H_START_M,               H_CCW_BEGIN_M,  H_CW_BEGIN_M,  H_START_M],           // H_START_M     (00)
    [H_START_M,               H_CW_BEGIN_M,   H_CW_BEGIN_M,  R_START | DIR_CW],    // H_CW_BEGIN_M  (10)
    [H_START_M,               H_CCW_BEGIN_M,  H_CCW_BEGIN_M, R_START | DIR_CCW],   // H_CCW_BEGIN_M (01)
];

/// Decoding resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// One step per detent
    #[default]
    Full,
    /// Two steps per detent
    Half,
}

impl Resolution {
    fn table(self) -> &'static [[u8; 4]] {
        match self {
            Resolution::Full => &FULL_STEP_TABLE,
            Resolution::Half => &HALF_STEP_TABLE,
        }
    }
}

/// Two-bit sample of the A and B signal levels
///
/// Bit 0 is A, bit 1 is B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawLevels(u8);

impl RawLevels {
    /// Sample from the logical level of each signal
    pub fn new(a: bool, b: bool) -> Self {
        Self(((b as u8) << 1) | a as u8)
    }

    /// Sample from packed bits (B in bit 1, A in bit 0); upper bits ignored
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Packed (B,A) bits
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Level of signal A
    pub fn a(&self) -> bool {
        self.0 & 0b01 != 0
    }

    /// Level of signal B
    pub fn b(&self) -> bool {
        self.0 & 0b10 != 0
    }
}

/// Opaque decoder state
///
/// Only meaningful together with the [`Resolution`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderState(u8);

impl EncoderState {
    /// Resting state at a detent
    pub const START: Self = EncoderState(R_START);
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::START
    }
}

/// Decode one sample
///
/// Pure function of the current state and the new sample. Returns the next
/// state and the step: +1 clockwise, -1 counter-clockwise, 0 for no step,
/// repeated samples and rejected transitions.
pub fn decode(resolution: Resolution, state: EncoderState, levels: RawLevels) -> (EncoderState, i8) {
    let table = resolution.table();
    // A state from the other table (after a resolution change) restarts
    let row = table.get(state.0 as usize).unwrap_or(&table[R_START as usize]);
    let cell = row[levels.bits() as usize];

    let step = match cell & !STATE_MASK {
        DIR_CW => 1,
        DIR_CCW => -1,
        _ => 0,
    };

    (EncoderState(cell & STATE_MASK), step)
}

/// Stateful wrapper around [`decode`]
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: EncoderState,
    resolution: Resolution,
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new(Resolution::Full)
    }
}

impl QuadratureDecoder {
    /// Create a decoder resting at a detent
    pub fn new(resolution: Resolution) -> Self {
        Self {
            state: EncoderState::START,
            resolution,
        }
    }

    /// Current resolution
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Change resolution and restart from the detent state
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        self.state = EncoderState::START;
    }

    /// Feed one A/B sample, returning the decoded step (-1, 0 or +1)
    pub fn update(&mut self, levels: RawLevels) -> i8 {
        let (next, step) = decode(self.resolution, self.state, levels);
        self.state = next;
        step
    }
}
