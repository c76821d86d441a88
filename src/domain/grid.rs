pub const DAYS_PER_WEEK: usize = 7;

/// Arranges a month's slots into week rows.
pub struct CalendarGridBuilder;

impl CalendarGridBuilder {
    /// Split `days` into consecutive rows of seven. Order is preserved and
    /// the final row is left short rather than padded.
    pub fn to_grid<T: Clone>(days: &[T]) -> Vec<Vec<T>> {
        days.chunks(DAYS_PER_WEEK).map(<[T]>::to_vec).collect()
    }
}
