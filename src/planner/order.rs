//! Ordering directives returned by the date resolver.

use crate::ir::OrderBy;
use crate::mdx::{MdxExpr, SortDir};

/// An explicit ordering baked into an axis expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordering {
    pub key: MdxExpr,
    pub dir: SortDir,
}

/// What happens to the query's ordering hint after date resolution.
///
/// Range and named-set axes are not flat member lists, so an ordering hint
/// cannot be honoured on them and is suppressed. Multi-select date sets carry
/// their own caption ordering, which overrides the hint.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OrderDirective {
    #[default]
    KeepOriginal,
    Suppressed,
    Overridden(Ordering),
}

impl OrderDirective {
    /// The ordering hint that survives compilation.
    pub fn apply(&self, hint: Option<&OrderBy>) -> Option<OrderBy> {
        match self {
            OrderDirective::KeepOriginal => hint.cloned(),
            OrderDirective::Suppressed | OrderDirective::Overridden(_) => None,
        }
    }

    /// Combine with a later directive; anything but `KeepOriginal` wins.
    pub fn then(self, next: OrderDirective) -> OrderDirective {
        match next {
            OrderDirective::KeepOriginal => self,
            other => other,
        }
    }
}
