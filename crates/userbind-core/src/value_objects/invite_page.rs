//! One page of the invite listing

use crate::entities::StudentInvite;

/// Page of invite records plus the totals needed for navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitePage {
    pub records: Vec<StudentInvite>,
    pub total: u64,
    pub page: u32,
    pub page_count: u32,
}

impl InvitePage {
    /// Clamp a requested page number to the 1-based range
    #[inline]
    pub fn normalize_page(page: i64) -> u32 {
        if page < 1 {
            1
        } else {
            u32::try_from(page).unwrap_or(u32::MAX)
        }
    }

    /// `ceil(total / page_size)`
    pub fn page_count(total: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        let count = total.div_ceil(u64::from(page_size));
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Row offset of a 1-based page
    #[inline]
    pub fn offset(page: u32, page_size: u32) -> i64 {
        i64::from(page.saturating_sub(1)) * i64::from(page_size)
    }
}
