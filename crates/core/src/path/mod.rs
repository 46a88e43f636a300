mod pathfinder;

pub use self::pathfinder::Pathfinder;

use crate::hex::{HexCoord, Heading};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A single move between two adjacent tiles
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub start: HexCoord,
    pub finish: HexCoord,
    /// The direction of travel for this move, which is also the direction the
    /// agent faces once it lands on `finish`
    pub heading: Heading,
}

/// An ordered list of moves from one tile to another. Each step starts where
/// the previous one finished. A path can be empty, which means the agent
/// stays where it is.
///
/// Paths are produced by a [Pathfinder], and are immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// A path with no steps
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a path from a list of steps. Returns an error if any step isn't
    /// a single move in its given heading, or if the steps don't chain
    /// together.
    pub fn new(steps: Vec<Step>) -> anyhow::Result<Self> {
        for step in &steps {
            let heading = Heading::between(step.start, step.finish)?;
            if heading != step.heading {
                return Err(anyhow!(
                    "Step from {} to {} has heading {:?}, expected {:?}",
                    step.start,
                    step.finish,
                    step.heading,
                    heading
                ));
            }
        }
        for pair in steps.windows(2) {
            if pair[0].finish != pair[1].start {
                return Err(anyhow!(
                    "Discontiguous path: step finishes at {} but the next \
                    step starts at {}",
                    pair[0].finish,
                    pair[1].start
                ));
            }
        }
        Ok(Self { steps })
    }

    /// Build a path without checking it. Only the pathfinder should do this,
    /// since it's the one thing we trust to build valid steps.
    pub(crate) fn new_unchecked(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The number of steps in this path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The first tile of the path, or `None` for an empty path
    pub fn start(&self) -> Option<HexCoord> {
        self.steps.first().map(|step| step.start)
    }

    /// The last tile of the path, or `None` for an empty path
    pub fn finish(&self) -> Option<HexCoord> {
        self.steps.last().map(|step| step.finish)
    }

    /// Every tile that the path touches, in order: the start of the first
    /// step, then the finish of each step. An empty path has no waypoints.
    pub fn waypoints(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.start()
            .into_iter()
            .chain(self.steps.iter().map(|step| step.finish))
    }

    /// Serializes this path into JSON, as a list of steps
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing path")
    }
}

impl TryFrom<Vec<Step>> for Path {
    type Error = anyhow::Error;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<Path> for Vec<Step> {
    fn from(path: Path) -> Self {
        path.steps
    }
}

/// Renders the headings of each step, e.g. `south -> south -> south_east`
impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headings: Vec<String> = self
            .steps
            .iter()
            .map(|step| step.heading.to_string())
            .collect();
        write!(f, "{}", headings.join(" -> "))
    }
}
