//! Sidebar navigation table.

/// One sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Route the link points to.
    pub href: &'static str,
    /// Text shown next to the icon.
    pub label: &'static str,
}

/// Sidebar links in display order.
pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem {
        href: "/dashboard",
        label: "Overview",
    },
    NavItem {
        href: "/dashboard/transactions",
        label: "Transactions",
    },
    NavItem {
        href: "/dashboard/budget",
        label: "Budget",
    },
    NavItem {
        href: "/dashboard/invoices",
        label: "Invoices",
    },
    NavItem {
        href: "/dashboard/stocks",
        label: "Stocks",
    },
    NavItem {
        href: "/dashboard/mutualfunds",
        label: "Mutual Funds",
    },
    NavItem {
        href: "/dashboard/books",
        label: "Books",
    },
];

/// Returns the link highlighted for `path`.
///
/// Matching is exact, ignoring one trailing slash, so `/dashboard/stocks`
/// highlights Stocks and not Overview.
pub fn nav_item_for_path(path: &str) -> Option<&'static NavItem> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    NAV_ITEMS.iter().find(|item| item.href == path)
}
