//! Tetrad eval crate - weighted structural grade of a settled board.
//! Lower grades are better.

mod features;

pub use features::Features;

use serde::{Deserialize, Serialize};
use tetrad_core::Board;

/// Bonus subtracted when the chain clears exactly four rows.
pub const TETRIS_BONUS: f64 = 1.0e9;
/// Bonus per cleared row in survival grading.
pub const SURVIVAL_LINE_BONUS: f64 = 1.0e2;

/// Coefficients for the 17 features. Defaults are tuned constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub lines: f64,
    pub lock_height: f64,
    pub well_cells: f64,
    pub deep_wells: f64,
    pub holes: f64,
    pub weighted_holes: f64,
    pub hole_depth: f64,
    pub min_hole_depth: f64,
    pub max_hole_depth: f64,
    pub column_transitions: f64,
    pub row_transitions: f64,
    pub total_height: f64,
    pub max_height: f64,
    pub height_spread: f64,
    pub solid_cells: f64,
    pub weighted_solid_cells: f64,
    pub height_dispersion: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            lines: 0.286127095297893900,
            lock_height: 1.701233676909959200,
            well_cells: 0.711304230768307700,
            deep_wells: 0.910665415998680400,
            holes: 1.879338064244357000,
            weighted_holes: 2.168463848297177000,
            hole_depth: -0.265587111961757270,
            min_hole_depth: 0.289886584949610500,
            max_hole_depth: 0.362361055261181730,
            column_transitions: -0.028668795795469625,
            row_transitions: 0.874179981113233100,
            total_height: -0.507409683144361900,
            max_height: -2.148676202831281000,
            height_spread: -1.187558540281141700,
            solid_cells: -2.645656132241128000,
            weighted_solid_cells: 0.242043416268706620,
            height_dispersion: 0.287838126164431440,
        }
    }
}

impl EvalWeights {
    /// Weights in feature order, for callers that tune them as a vector.
    pub fn to_array(&self) -> [f64; 17] {
        [
            self.lines,
            self.lock_height,
            self.well_cells,
            self.deep_wells,
            self.holes,
            self.weighted_holes,
            self.hole_depth,
            self.min_hole_depth,
            self.max_hole_depth,
            self.column_transitions,
            self.row_transitions,
            self.total_height,
            self.max_height,
            self.height_spread,
            self.solid_cells,
            self.weighted_solid_cells,
            self.height_dispersion,
        ]
    }

    pub fn from_array(p: [f64; 17]) -> Self {
        Self {
            lines: p[0],
            lock_height: p[1],
            well_cells: p[2],
            deep_wells: p[3],
            holes: p[4],
            weighted_holes: p[5],
            hole_depth: p[6],
            min_hole_depth: p[7],
            max_hole_depth: p[8],
            column_transitions: p[9],
            row_transitions: p[10],
            total_height: p[11],
            max_height: p[12],
            height_spread: p[13],
            solid_cells: p[14],
            weighted_solid_cells: p[15],
            height_dispersion: p[16],
        }
    }

    /// Weighted sum of the features, without any mode bonus.
    pub fn weigh(&self, f: &Features) -> f64 {
        f.lines as f64 * self.lines
            + f.lock_heights as f64 * self.lock_height
            + f.well_cells as f64 * self.well_cells
            + f.deep_wells as f64 * self.deep_wells
            + f.holes as f64 * self.holes
            + f.weighted_holes as f64 * self.weighted_holes
            + f.hole_depth as f64 * self.hole_depth
            + f.min_hole_depth as f64 * self.min_hole_depth
            + f.max_hole_depth as f64 * self.max_hole_depth
            + f.column_transitions as f64 * self.column_transitions
            + f.row_transitions as f64 * self.row_transitions
            + f.total_height as f64 * self.total_height
            + f.max_height as f64 * self.max_height
            + f.height_spread as f64 * self.height_spread
            + f.solid_cells as f64 * self.solid_cells
            + f.weighted_solid_cells as f64 * self.weighted_solid_cells
            + f.height_dispersion as f64 * self.height_dispersion
    }
}

/// Bias applied on top of the weighted sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingMode {
    /// Only a four-row clear earns a bonus, so smaller clears are deferred.
    #[default]
    Tetris,
    /// Every clear earns a bonus proportional to rows cleared.
    Survival,
}

impl GradingMode {
    pub fn bonus(self, lines: u32) -> f64 {
        match self {
            GradingMode::Tetris if lines == 4 => TETRIS_BONUS,
            GradingMode::Survival if lines > 0 => SURVIVAL_LINE_BONUS * lines as f64,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluator {
    pub weights: EvalWeights,
    pub mode: GradingMode,
}

impl Evaluator {
    pub fn new(weights: EvalWeights, mode: GradingMode) -> Self {
        Self { weights, mode }
    }

    /// Grade a post-lock, post-clear board. `lines` is the total cleared along the chain.
    pub fn evaluate(&self, lines: u32, board: &Board, lock_heights: &[Option<i8>]) -> f64 {
        let features = Features::extract(lines, board, lock_heights);
        self.weights.weigh(&features) - self.mode.bonus(lines)
    }
}

/// Grade with the default weights and four-row bonus.
pub fn evaluate(lines: u32, board: &Board, lock_heights: &[Option<i8>]) -> f64 {
    Evaluator::default().evaluate(lines, board, lock_heights)
}
