use shared::constants::FULL_ROTATIONS;
use shared::{ChanceTable, Currency, ReportStatus, SpinResult, TierId, WheelLayout};
use yew::prelude::*;

use super::wheel_canvas::WheelSegment;
use crate::styles;

const LOSE_SECTOR_COLOR: &str = "#374151";

/// Mono wheel: the selected chance as one sector from the pointer, the rest grey.
pub fn percentage_segments(chance: u8, color: &str, label: &str) -> Vec<WheelSegment> {
    let win_end = chance as f64 * 3.6;
    vec![
        WheelSegment { start_deg: 0.0, end_deg: win_end, color: color.to_string(), label: label.to_string() },
        WheelSegment { start_deg: win_end, end_deg: 360.0, color: LOSE_SECTOR_COLOR.to_string(), label: String::new() },
    ]
}

/// Lucky2 wheel: one sector per color, sized by its probability.
pub fn color_segments(table: &ChanceTable) -> Vec<WheelSegment> {
    table
        .tiers()
        .iter()
        .filter_map(|tier| {
            let (start_deg, end_deg) = table.sector_bounds(tier.id)?;
            Some(WheelSegment {
                start_deg,
                end_deg,
                color: tier.display_color.clone(),
                label: tier.payout_multiplier.to_string(),
            })
        })
        .collect()
}

/// Where on the wheel (degrees clockwise from the top) the spin should stop.
pub fn landing_angle(table: &ChanceTable, result: &SpinResult) -> f64 {
    let center = (result.outcome.drawn_number as f64 - 0.5) * 3.6;
    match table.layout() {
        WheelLayout::Percentage => center,
        WheelLayout::Color => {
            let bounds = result
                .outcome
                .winning_color
                .and_then(|color| table.sector_bounds(TierId::Color(color)));
            match bounds {
                // Keep clear of the dividers
                Some((start, end)) => center.clamp(start + 2.0, (end - 2.0).max(start + 2.0)),
                None => center,
            }
        }
    }
}

/// Footnote under a result when it did not reach the player's account.
pub fn report_note(report: &ReportStatus) -> Option<&'static str> {
    match report {
        ReportStatus::Acknowledged => None,
        ReportStatus::Demo => Some("Demo spin, kept on this device"),
        ReportStatus::Skipped | ReportStatus::Failed(_) => Some("Played offline"),
    }
}

/// Rotation that brings `landing_deg` under the pointer after a few full
/// turns. Always moves forward from `current`.
pub fn target_rotation(current: f64, landing_deg: f64) -> f64 {
    let resting = current.rem_euclid(360.0);
    let offset = (360.0 - landing_deg - resting).rem_euclid(360.0);
    current + FULL_ROTATIONS * 360.0 + offset
}

#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub result: Option<SpinResult>,
    pub currency: Currency,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let Some(result) = &props.result else {
        return html! {};
    };
    let outcome = &result.outcome;
    let unit = props.currency.emoji();

    let (headline, classes) = if outcome.won {
        (
            format!("You won {} {}!", result.settlement.net_payout, unit),
            "from-green-400 to-emerald-600 border-green-300 animate-bounce",
        )
    } else {
        (
            format!("Better luck next time: -{} {}", result.selection.bet_amount, unit),
            "from-gray-500 to-gray-700 border-gray-400",
        )
    };

    let detail = match outcome.winning_color {
        Some(color) => format!("Landed on {} {}", color.emoji(), color.display_name()),
        None => format!("Drawn number: {}", outcome.drawn_number),
    };

    html! {
        <div class="mt-4 flex flex-col items-center space-y-2">
            <div class={classes!(
                "px-6", "py-3", "rounded-xl", "bg-gradient-to-r", "text-white",
                "font-bold", "text-lg", "shadow-lg", "border-2", classes
            )}>
                {headline}
            </div>
            <div class="text-sm text-gray-400 bg-gray-800 px-4 py-1 rounded-full">{detail}</div>
            if let Some(item) = &outcome.bonus_item {
                <div class="text-sm font-semibold text-purple-300">
                    {format!("🎁 Bonus item: {} ({})", item.name, item.rarity.display_name())}
                </div>
            }
            if let Some(note) = report_note(&result.report) {
                <div class={styles::TEXT_SMALL}>{note}</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BetControlsProps {
    pub amount: u64,
    pub currency: Currency,
    pub minimum: u64,
    pub disabled: bool,
    pub on_down: Callback<MouseEvent>,
    pub on_up: Callback<MouseEvent>,
}

#[function_component(BetControls)]
pub fn bet_controls(props: &BetControlsProps) -> Html {
    html! {
        <div class="flex items-center justify-between my-3">
            <button class={styles::BUTTON_SECONDARY} disabled={props.disabled} onclick={props.on_down.clone()}>{"−"}</button>
            <div class="text-center">
                <div class="text-2xl font-bold">{format!("{} {}", props.amount, props.currency.emoji())}</div>
                <div class={styles::TEXT_SMALL}>{format!("min {} {}", props.minimum, props.currency)}</div>
            </div>
            <button class={styles::BUTTON_SECONDARY} disabled={props.disabled} onclick={props.on_up.clone()}>{"+"}</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rotation_lands_under_pointer() {
        for (current, landing) in [(0.0, 90.0), (1890.0, 10.0), (45.5, 359.0)] {
            let target = target_rotation(current, landing);
            assert!(target >= current + FULL_ROTATIONS * 360.0);
            assert!(((target + landing).rem_euclid(360.0)).abs() < 1e-9
                || ((target + landing).rem_euclid(360.0) - 360.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_color_segments_cover_the_wheel() {
        let segments = color_segments(&ChanceTable::lucky2());
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].start_deg, 0.0);
        assert!((segments[2].end_deg - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_demo_spins_are_not_labelled_offline() {
        assert_eq!(report_note(&ReportStatus::Demo), Some("Demo spin, kept on this device"));
        assert_eq!(report_note(&ReportStatus::Failed("timeout".to_string())), Some("Played offline"));
        assert_eq!(report_note(&ReportStatus::Acknowledged), None);
    }
}
