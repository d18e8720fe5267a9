use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeInfo};
use crate::graph::style::{EDGE_COLOR, Shape};

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_stars(state, ctx);
	if !state.visible {
		return;
	}
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

fn draw_stars(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("white");
	for star in &state.stars {
		ctx.set_global_alpha(star.alpha(state.flow_time));
		ctx.begin_path();
		let _ = ctx.arc(
			star.x * state.width,
			star.y * state.height,
			star.size / 2.0,
			0.0,
			2.0 * PI,
		);
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	ctx.set_stroke_style_str(EDGE_COLOR);
	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		ctx.set_line_width(edge.user_data.width / k.max(0.5));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	});
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: Shape, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	match shape {
		Shape::Dot => {
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		}
		Shape::Triangle => {
			for i in 0..3 {
				let angle = -PI / 2.0 + i as f64 * 2.0 * PI / 3.0;
				let (px, py) = (x + r * 1.2 * angle.cos(), y + r * 1.2 * angle.sin());
				if i == 0 {
					ctx.move_to(px, py);
				} else {
					ctx.line_to(px, py);
				}
			}
		}
		Shape::Star => {
			for i in 0..10 {
				let radius = if i % 2 == 0 { r * 1.4 } else { r * 0.6 };
				let angle = -PI / 2.0 + i as f64 * PI / 5.0;
				let (px, py) = (x + radius * angle.cos(), y + radius * angle.sin());
				if i == 0 {
					ctx.move_to(px, py);
				} else {
					ctx.line_to(px, py);
				}
			}
		}
	}
	ctx.close_path();
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	x: f64,
	y: f64,
	k: f64,
	hovered: bool,
) {
	let alpha = info.visual.opacity;
	if info.shadow {
		ctx.set_shadow_color(&format!("rgba(0, 0, 0, {})", 0.5 * alpha));
		ctx.set_shadow_blur(10.0);
		ctx.set_shadow_offset_x(3.0);
		ctx.set_shadow_offset_y(3.0);
	}
	ctx.set_global_alpha(alpha);
	trace_shape(ctx, info.shape, x, y, info.radius);
	ctx.set_fill_style_str(info.color);
	ctx.fill();
	ctx.set_shadow_color("transparent");
	ctx.set_shadow_blur(0.0);

	if hovered {
		trace_shape(ctx, info.shape, x, y, info.radius + 2.0 / k);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);

	// Font color already encodes the dimmed state
	ctx.set_fill_style_str(info.visual.font_color);
	ctx.set_font(&format!(
		"{}px sans-serif",
		info.font_size * 0.5 / k.max(0.5)
	));
	let _ = ctx.fill_text(&info.label, x + info.radius + 3.0, y + 3.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	// Dimmed nodes first so focused ones sit on top.
	for dimmed_pass in [true, false] {
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if (info.visual.opacity < 1.0) != dimmed_pass {
				return;
			}
			draw_node(
				ctx,
				info,
				node.x() as f64,
				node.y() as f64,
				k,
				state.is_hovered(node.index()),
			);
		});
	}
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(title) = state.hovered_title() else {
		return;
	};
	let lines: Vec<&str> = title.lines().collect();
	ctx.set_font("13px sans-serif");
	let width = lines
		.iter()
		.filter_map(|l| ctx.measure_text(l).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let (x, y) = (state.hover.x + 14.0, state.hover.y + 14.0);
	let height = 18.0 * lines.len() as f64 + 8.0;

	ctx.set_fill_style_str("rgba(0, 0, 0, 0.75)");
	ctx.fill_rect(x, y, width + 16.0, height);
	ctx.set_fill_style_str("white");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x + 8.0, y + 18.0 * (i as f64 + 1.0));
	}
}
