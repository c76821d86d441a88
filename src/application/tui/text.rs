use crate::application::CalendarWidget;
use crate::domain::calendar_math::WEEKDAY_SHORT;
use crate::domain::Slot;

/// Plain-text month grid for non-interactive output.
///
/// Anchors print as `[ 5]`, in-range days as `( 6)`.
pub struct TextRenderer;

impl TextRenderer {
    pub fn render_month(widget: &dyn CalendarWidget) -> String {
        let mut out = String::new();
        let header: Vec<String> = WEEKDAY_SHORT.iter().map(|d| format!("{:>4}", d)).collect();
        let header = header.concat();

        out.push_str(&format!("{:^width$}\n", widget.title(), width = header.len()));
        out.push_str(&header);
        out.push('\n');

        for week in widget.days() {
            let line: String = week
                .iter()
                .map(|slot| Self::render_slot(widget, *slot))
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out.push_str(&widget.summary());
        out.push('\n');
        out
    }

    fn render_slot(widget: &dyn CalendarWidget, slot: Slot) -> String {
        let Some(cell) = slot.id().and_then(|id| widget.cell(id)) else {
            return "    ".to_string();
        };

        let day = format!("{:>2}", cell.day_number());
        if cell.selected {
            format!("[{}]", day)
        } else if cell.in_range {
            format!("({})", day)
        } else {
            format!(" {} ", day)
        }
    }
}
