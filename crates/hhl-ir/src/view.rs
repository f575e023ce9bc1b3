//! Zero-copy views over quantum registers.
//!
//! A [`QuantumView`] is an ordered sequence of qubit addresses with uniform
//! indexed access. Views come in three kinds:
//!
//! - **Base**: wraps a [`QuantumRegister`] directly.
//! - **Slice**: selects `start, start + step, ...` below `stop` of a parent view.
//! - **Bond**: concatenates several views end to end.
//!
//! Derived views keep a shared, immutable snapshot of their parents, so
//! cloning a view is cheap and never copies the underlying allocation.
//! Every view also carries an [`Orientation`]. Reversing a view flips that
//! flag in place and only affects the view it is called on: views derived
//! earlier hold their own snapshot and keep their behaviour.
//!
//! Index resolution applies the view's own orientation first and then
//! delegates through the derivation chain until it reaches a base register.
//! For a reversed bond this is the same as walking the parts back to front
//! and mirroring the index inside the owning part, so part order and
//! in-part direction always flip together.
//!
//! # Example
//!
//! ```rust
//! use hhl_ir::{Circuit, QuantumView};
//!
//! let mut circuit = Circuit::new("views");
//! let a = circuit.add_qreg("a", 1);
//! let b = circuit.add_qreg("b", 4);
//! let c = circuit.add_qreg("c", 2);
//!
//! let joined = QuantumView::bond([&a, &b, &c]);
//! assert_eq!(joined.len(), 7);
//! assert_eq!(joined.get(5).unwrap(), c.get(0).unwrap());
//!
//! let evens = b.slice(0, 4, 2).unwrap();
//! assert_eq!(evens.get(1).unwrap(), b.get(2).unwrap());
//! ```

use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::{QubitId, RegisterId};
use crate::register::{QuantumRegister, position};

/// Mapping direction between logical index and physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Logical index `k` maps to the `k`-th element of the source.
    #[default]
    Ascending,
    /// Logical index `k` maps to the `(size - 1 - k)`-th element of the source.
    Reversed,
}

impl Orientation {
    /// The opposite orientation.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Ascending => Orientation::Reversed,
            Orientation::Reversed => Orientation::Ascending,
        }
    }
}

/// How a view was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    /// Wraps an allocation directly.
    Base,
    /// Strided sub-range of a parent view.
    Slice,
    /// Concatenation of parent views.
    Bond,
}

#[derive(Debug, Clone)]
enum Source {
    Base(RegisterId),
    Slice {
        parent: Arc<QuantumView>,
        start: usize,
        step: usize,
    },
    Bond(Arc<[QuantumView]>),
}

/// An addressable, possibly derived, view over qubit addresses.
#[derive(Debug, Clone)]
pub struct QuantumView {
    name: Arc<str>,
    size: usize,
    orientation: Orientation,
    source: Source,
}

impl QuantumView {
    /// Wrap a base register in ascending orientation.
    pub fn wrap(register: &QuantumRegister) -> Self {
        Self {
            name: Arc::from(register.name()),
            size: register.len(),
            orientation: Orientation::Ascending,
            source: Source::Base(register.id()),
        }
    }

    /// Concatenate views end to end.
    ///
    /// The name of the result is the concatenation of the part names and its
    /// size the sum of the part sizes. Each part keeps its own orientation.
    pub fn bond<'a>(parts: impl IntoIterator<Item = &'a QuantumView>) -> Self {
        let parts: Arc<[QuantumView]> = parts.into_iter().cloned().collect();
        let name: String = parts.iter().map(|p| p.name()).collect();
        let size = parts.iter().map(QuantumView::len).sum();
        Self {
            name: Arc::from(name),
            size,
            orientation: Orientation::Ascending,
            source: Source::Bond(parts),
        }
    }

    /// Concatenate this view with another one.
    #[must_use]
    pub fn join(&self, other: &QuantumView) -> Self {
        Self::bond([self, other])
    }

    /// Select indices `start, start + step, ...` strictly below `stop`.
    ///
    /// Indices are logical indices of this view as it is currently oriented.
    /// The slice starts in ascending orientation.
    pub fn slice(&self, start: usize, stop: usize, step: usize) -> IrResult<Self> {
        if step == 0 || start > stop || stop > self.size {
            return Err(IrError::InvalidSlice {
                start,
                stop,
                step,
                size: self.size,
            });
        }
        Ok(Self {
            name: Arc::clone(&self.name),
            size: (stop - start).div_ceil(step),
            orientation: Orientation::Ascending,
            source: Source::Slice {
                parent: Arc::new(self.clone()),
                start,
                step,
            },
        })
    }

    /// Contiguous sub-range, shorthand for `slice(start, end, 1)`.
    pub fn range(&self, range: std::ops::Range<usize>) -> IrResult<Self> {
        self.slice(range.start, range.end, 1)
    }

    /// Flip the orientation flag in place.
    pub fn reverse(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    /// A copy of this view with the orientation flipped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut view = self.clone();
        view.reverse();
        view
    }

    /// Get the view name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of addressable qubits.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Get the current orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Check if the view is currently reversed.
    pub fn is_reversed(&self) -> bool {
        self.orientation == Orientation::Reversed
    }

    /// Get the derivation kind.
    pub fn kind(&self) -> ViewKind {
        match self.source {
            Source::Base(_) => ViewKind::Base,
            Source::Slice { .. } => ViewKind::Slice,
            Source::Bond(_) => ViewKind::Bond,
        }
    }

    /// Number of derivation steps between this view and its deepest base.
    pub fn depth(&self) -> usize {
        match &self.source {
            Source::Base(_) => 0,
            Source::Slice { parent, .. } => parent.depth() + 1,
            Source::Bond(parts) => parts.iter().map(QuantumView::depth).max().unwrap_or(0) + 1,
        }
    }

    /// Resolve a logical index to a qubit address.
    pub fn get(&self, index: usize) -> IrResult<QubitId> {
        self.locate(index).ok_or(IrError::IndexOutOfRange {
            index,
            size: self.size,
        })
    }

    fn locate(&self, index: usize) -> Option<QubitId> {
        if index >= self.size {
            return None;
        }
        let logical = match self.orientation {
            Orientation::Ascending => index,
            Orientation::Reversed => self.size - 1 - index,
        };
        match &self.source {
            Source::Base(register) => Some(QubitId::new(*register, position(logical))),
            Source::Slice {
                parent,
                start,
                step,
            } => parent.locate(start + logical * step),
            Source::Bond(parts) => {
                let mut offset = 0;
                for part in parts.iter() {
                    if logical - offset < part.len() {
                        return part.locate(logical - offset);
                    }
                    offset += part.len();
                }
                None
            }
        }
    }

    /// Iterate over the resolved qubits in logical order.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        (0..self.size).filter_map(move |i| self.locate(i))
    }

    /// Collect the resolved qubits in logical order.
    pub fn qubits(&self) -> Vec<QubitId> {
        self.iter().collect()
    }
}

impl From<&QuantumRegister> for QuantumView {
    fn from(register: &QuantumRegister) -> Self {
        QuantumView::wrap(register)
    }
}

impl Add<&QuantumView> for &QuantumView {
    type Output = QuantumView;

    fn add(self, rhs: &QuantumView) -> QuantumView {
        self.join(rhs)
    }
}

impl fmt::Display for QuantumView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.orientation {
            Orientation::Ascending => "",
            Orientation::Reversed => "~",
        };
        write!(f, "{arrow}{}[{}]", self.name, self.size)
    }
}
