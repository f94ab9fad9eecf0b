use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

/// One slice of the wheel, in degrees clockwise from the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelSegment {
    pub start_deg: f64,
    pub end_deg: f64,
    pub color: String,
    pub label: String,
}

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub segments: Vec<WheelSegment>,
    pub rotation: f64,
    pub is_spinning: bool,
    /// Length of the current spin animation.
    pub duration_ms: u32,
}

// Canvas angles start at 3 o'clock; the pointer sits at 12
fn to_canvas_angle(deg: f64) -> f64 {
    (deg - 90.0) * PI / 180.0
}

fn draw_wheel(canvas: &HtmlCanvasElement, segments: &[WheelSegment]) -> Option<()> {
    let context = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 10.0;

    context.clear_rect(0.0, 0.0, width, height);

    context.begin_path();
    context.set_fill_style_str("#1a1c2e");
    context.arc(center_x, center_y, radius, 0.0, 2.0 * PI).ok()?;
    context.fill();

    for segment in segments {
        let start = to_canvas_angle(segment.start_deg);
        let end = to_canvas_angle(segment.end_deg);

        context.begin_path();
        context.set_fill_style_str(&segment.color);
        context.move_to(center_x, center_y);
        context.arc(center_x, center_y, radius, start, end).ok()?;
        context.close_path();
        context.fill();

        context.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
        context.set_line_width(2.0);
        context.stroke();

        // Labels only where the slice is wide enough to hold them
        if segment.end_deg - segment.start_deg >= 12.0 && !segment.label.is_empty() {
            let middle = (start + end) / 2.0;
            context.save();
            context.translate(center_x, center_y).ok()?;
            context.rotate(middle).ok()?;
            context.set_fill_style_str("#ffffff");
            context.set_font("bold 14px sans-serif");
            context.set_text_align("right");
            context.fill_text(&segment.label, radius - 12.0, 5.0).ok()?;
            context.restore();
        }
    }

    context.begin_path();
    context.set_fill_style_str("#111827");
    context.arc(center_x, center_y, radius * 0.18, 0.0, 2.0 * PI).ok()?;
    context.fill();

    Some(())
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.segments.clone(), move |segments| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if draw_wheel(&canvas, segments).is_none() {
                    log::warn!("wheel canvas unavailable");
                }
            }
            || ()
        });
    }

    let transition = if props.is_spinning {
        format!("transform {}ms cubic-bezier(0.17, 0.67, 0.12, 0.99)", props.duration_ms)
    } else {
        "none".to_string()
    };
    let style = format!("transform: rotate({}deg); transition: {};", props.rotation, transition);

    html! {
        <div class="relative flex justify-center my-4">
            <div class="absolute -top-1 z-10 text-3xl text-yellow-400 drop-shadow">{"▼"}</div>
            <canvas ref={canvas_ref} width="300" height="300" class="rounded-full" {style} />
        </div>
    }
}
