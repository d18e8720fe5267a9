//! Fixed category → style table. Size is the only per-node override.

use serde::Serialize;

use super::model::NodeKind;

/// Stroke color of every edge.
pub const EDGE_COLOR: &str = "#aaaaaa";
/// Label size in pixels at zoom 1.
pub const FONT_SIZE: f64 = 20.0;
/// Label color while a node is focused.
pub const FONT_COLOR: &str = "white";

/// Marker drawn for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Shape {
	Dot,
	Star,
	Triangle,
}

/// Label font.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Font {
	/// Pixels at zoom 1.
	pub size: f64,
	/// CSS color.
	pub color: &'static str,
}

/// Everything the category decides about a node's look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Fill color.
	pub color: &'static str,
	/// Marker shape.
	pub shape: Shape,
	/// Label font.
	pub font: Font,
	/// Whether a glow is drawn.
	pub shadow: bool,
}

const FONT: Font = Font {
	size: FONT_SIZE,
	color: FONT_COLOR,
};

/// Style for a category; papers and unknown types share the paper look.
pub fn lookup(kind: &NodeKind) -> NodeStyle {
	let (color, shape) = match kind {
		NodeKind::Central => ("#FFD700", Shape::Star),
		NodeKind::Coauthor => ("#00C49A", Shape::Dot),
		NodeKind::Institution => ("#FF6F91", Shape::Triangle),
		NodeKind::Paper { .. } | NodeKind::Other => ("#4DA6FF", Shape::Dot),
	};
	NodeStyle {
		color,
		shape,
		font: FONT,
		shadow: true,
	}
}

/// Legend rows shown next to the canvas.
pub const LEGEND: &[(&str, &str)] = &[
	("Central author", "#FFD700"),
	("Co-authors", "#00C49A"),
	("Publications", "#4DA6FF"),
	("Institutions", "#FF6F91"),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn category_determines_style() {
		assert_eq!(lookup(&NodeKind::Central).shape, Shape::Star);
		assert_eq!(lookup(&NodeKind::Institution).color, "#FF6F91");
		assert_eq!(
			lookup(&NodeKind::Paper { year: 1990 }),
			lookup(&NodeKind::Other)
		);
		assert!(lookup(&NodeKind::Coauthor).shadow);
	}
}
