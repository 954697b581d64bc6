use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{LinkGlyph, NodeGlyph};
use super::state::GraphView;
use crate::graph::types::LEGEND;

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: (u8, u8, u8) = (153, 153, 153);
const LABEL_COLOR: &str = "#012027";
const ARROW_SIZE: f64 = 6.0;

/// Font, alignment and baseline set together so no draw call inherits
/// another's text state.
#[derive(Clone, Debug, PartialEq)]
struct TextStyle {
	font: String,
	align: &'static str,
	baseline: &'static str,
}

impl TextStyle {
	fn apply(&self, ctx: &CanvasRenderingContext2d) {
		ctx.set_font(&self.font);
		ctx.set_text_align(self.align);
		ctx.set_text_baseline(self.baseline);
	}
}

/// Relation text sits just above its link, shrinking less than the zoom.
fn link_label_text(k: f64) -> TextStyle {
	TextStyle {
		font: format!("{}px sans-serif", 10.0 / k.max(0.5)),
		align: "center",
		baseline: "alphabetic",
	}
}

fn node_label_text() -> TextStyle {
	TextStyle {
		font: "10px sans-serif".into(),
		align: "left",
		baseline: "middle",
	}
}

fn legend_text() -> TextStyle {
	TextStyle {
		font: "12px sans-serif".into(),
		align: "left",
		baseline: "middle",
	}
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn set_dash(ctx: &CanvasRenderingContext2d, dashed: bool, k: f64) {
	let pattern = if dashed {
		js_sys::Array::of2(&JsValue::from_f64(5.0 / k), &JsValue::from_f64(5.0 / k))
	} else {
		js_sys::Array::new()
	};
	let _ = ctx.set_line_dash(&pattern);
}

pub fn render(view: &GraphView, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, view.width, view.height);

	ctx.save();
	let _ = ctx.translate(view.transform.x, view.transform.y);
	let _ = ctx.scale(view.transform.k, view.transform.k);
	let fade = ease_out_cubic(view.fade.t);
	for link in view.scene().links() {
		draw_link(view, ctx, link, fade);
	}
	for node in view.scene().nodes() {
		draw_node(view, ctx, node, fade);
	}
	for link in view.scene().links() {
		draw_link_label(view, ctx, link, fade);
	}
	ctx.restore();

	draw_legend(ctx);
}

fn draw_link(view: &GraphView, ctx: &CanvasRenderingContext2d, link: &LinkGlyph, fade: f64) {
	let alpha = 1.0 + (link.opacity - 1.0) * fade;
	if alpha <= 0.01 {
		return;
	}
	let (dx, dy) = (link.to.x - link.from.x, link.to.y - link.from.y);
	let dist = dx.hypot(dy);
	if dist < 0.001 {
		return;
	}
	let target_radius = view.scene().node(link.target).map_or(10.0, |n| n.radius);
	let (ux, uy) = (dx / dist, dy / dist);
	let (r, g, b) = LINK_COLOR;
	let k = view.transform.k;

	ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {alpha})"));
	ctx.set_line_width(link.stroke_width);
	set_dash(ctx, link.dashed, k);
	ctx.begin_path();
	ctx.move_to(link.from.x, link.from.y);
	ctx.line_to(
		link.to.x - ux * (target_radius + ARROW_SIZE),
		link.to.y - uy * (target_radius + ARROW_SIZE),
	);
	ctx.stroke();
	set_dash(ctx, false, k);

	ctx.set_fill_style_str(&format!("rgba({r}, {g}, {b}, {alpha})"));
	let (tip_x, tip_y) = (link.to.x - ux * target_radius, link.to.y - uy * target_radius);
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_link_label(view: &GraphView, ctx: &CanvasRenderingContext2d, link: &LinkGlyph, fade: f64) {
	// relation labels only show around a focused node
	let alpha = link.label_opacity * fade;
	if alpha <= 0.01 || link.relation.is_empty() {
		return;
	}
	let mid = link.label_anchor();
	let mut angle = link.label_angle();
	if angle.abs() > 90.0 {
		angle += 180.0;
	}
	ctx.save();
	ctx.set_global_alpha(alpha);
	let _ = ctx.translate(mid.x, mid.y);
	let _ = ctx.rotate(angle.to_radians());
	link_label_text(view.transform.k).apply(ctx);
	ctx.set_fill_style_str(LABEL_COLOR);
	let _ = ctx.fill_text(&link.relation, 0.0, -3.0);
	ctx.restore();
}

fn draw_node(view: &GraphView, ctx: &CanvasRenderingContext2d, node: &NodeGlyph, fade: f64) {
	let alpha = 1.0 + (node.opacity - 1.0) * fade;
	if alpha <= 0.01 {
		return;
	}
	let (x, y) = (node.position.x, node.position.y);
	let k = view.transform.k;
	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(node.fill);
	ctx.fill();
	if node.is_shared {
		ctx.set_stroke_style_str("#000000");
		ctx.set_line_width(2.0);
		set_dash(ctx, true, k);
		ctx.stroke();
		set_dash(ctx, false, k);
	}
	if view.selection().hovered() == Some(node.id) {
		ctx.begin_path();
		let _ = ctx.arc(x, y, node.radius + 2.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&format!("rgba(1, 32, 39, {})", 0.7 * fade));
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	}

	let label_alpha = 1.0 + (node.label_opacity - 1.0) * fade;
	if label_alpha > 0.01 && !node.label.is_empty() {
		let anchor = node.label_anchor();
		let (w, h) = node.label_size();
		ctx.set_global_alpha(label_alpha);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
		ctx.fill_rect(anchor.x, anchor.y - h / 2.0, w, h);
		ctx.set_fill_style_str(LABEL_COLOR);
		node_label_text().apply(ctx);
		let _ = ctx.fill_text(&node.label, anchor.x + 4.0, anchor.y);
	}
	ctx.set_global_alpha(1.0);
}

/// Category swatches in screen space, top-left.
fn draw_legend(ctx: &CanvasRenderingContext2d) {
	let (x, mut y) = (16.0, 20.0);
	legend_text().apply(ctx);
	for entry in &LEGEND {
		ctx.begin_path();
		let _ = ctx.arc(x, y, 6.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(entry.color);
		ctx.fill();
		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(entry.label, x + 12.0, y);
		y += 18.0;
	}
}
