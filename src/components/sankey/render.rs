use web_sys::CanvasRenderingContext2d;

use super::color::link_color;
use super::state::SankeyState;

const LINK_ALPHA: f64 = 0.45;
const LINK_ALPHA_HIGHLIGHTED: f64 = 0.75;
const DIMMED_ALPHA: f64 = 0.12;
const LABEL_FONT: &str = "11px sans-serif";

pub fn render(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width(), state.height());
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.set_global_alpha(1.0);
}

fn draw_links(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let has_highlight = state.has_active_highlight();

	// thickest first, thin ribbons end up on top
	let mut links: Vec<_> = state.graph.links().iter().collect();
	links.sort_by(|a, b| b.thickness.total_cmp(&a.thickness));

	for link in links {
		let Some(curve) = state.curve(link.id) else {
			continue;
		};
		let alpha = match (has_highlight, state.is_link_highlighted(link.id)) {
			(false, _) => LINK_ALPHA,
			(true, true) => LINK_ALPHA_HIGHLIGHTED,
			(true, false) => DIMMED_ALPHA,
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(link_color(&state.graph, link.id));
		// keep zero-volume links visible as a hairline
		ctx.set_line_width(link.thickness.max(1.0));
		ctx.begin_path();
		ctx.move_to(curve.start.0, curve.start.1);
		ctx.bezier_curve_to(
			curve.control1.0,
			curve.control1.1,
			curve.control2.0,
			curve.control2.1,
			curve.end.0,
			curve.end.1,
		);
		ctx.stroke();
	}
}

fn draw_nodes(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let has_highlight = state.has_active_highlight();
	let node_width = state.params.node_width;
	let last_layer = state.graph.layers().len().saturating_sub(1);

	ctx.set_font(LABEL_FONT);
	ctx.set_text_baseline("middle");

	for node in state.graph.nodes() {
		let alpha = if has_highlight && !state.is_node_highlighted(node.id) {
			DIMMED_ALPHA * 2.0
		} else {
			1.0
		};
		ctx.set_global_alpha(alpha);
		ctx.set_fill_style_str(node.color);
		ctx.fill_rect(node.x, node.top(), node_width, node.height);

		ctx.set_fill_style_str("#333");
		// last layer labels sit left of the bar so they stay on the canvas
		if node.layer == last_layer && last_layer > 0 {
			ctx.set_text_align("right");
			let _ = ctx.fill_text(&node.label, node.x - 4.0, node.y);
		} else {
			ctx.set_text_align("left");
			let _ = ctx.fill_text(&node.label, node.x + node_width + 4.0, node.y);
		}
	}
}
