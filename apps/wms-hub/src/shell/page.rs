//! The closed set of pages the shell can show.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Customers,
    Warehouses,
    Commodities,
    Inventory,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Customers,
        Page::Warehouses,
        Page::Commodities,
        Page::Inventory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Customers => "Customers",
            Page::Warehouses => "Warehouses",
            Page::Commodities => "Commodities",
            Page::Inventory => "Inventory",
        }
    }

    /// Name typed at the prompt.
    pub fn command(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Customers => "customers",
            Page::Warehouses => "warehouses",
            Page::Commodities => "commodities",
            Page::Inventory => "inventory",
        }
    }

    pub fn from_name(name: &str) -> Option<Page> {
        Page::ALL
            .into_iter()
            .find(|p| p.command().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Page {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::from_name(s.trim()).ok_or_else(|| AppError::UnknownPage(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parsing() {
        assert_eq!("inventory".parse::<Page>().unwrap(), Page::Inventory);
        assert_eq!("Customers".parse::<Page>().unwrap(), Page::Customers);
        assert!(matches!("orders".parse::<Page>(), Err(AppError::UnknownPage(_))));
    }

    #[test]
    fn test_default_is_dashboard() {
        assert_eq!(Page::default(), Page::Dashboard);
        assert_eq!(Page::ALL[0], Page::Dashboard);
    }
}
