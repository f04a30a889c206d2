//! Pure account hierarchy assembly.
//!
//! The registry stores accounts as flat rows with a `parent_account`
//! self-reference; this module turns one fetch of those rows into the
//! nested tree the hierarchy endpoint and reports consume.

use std::collections::HashMap;

use folio_shared::types::AccountId;

use super::types::Account;

/// An account with its nested children.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AccountNode {
    /// The account itself.
    #[serde(flatten)]
    pub account: Account,
    /// Child accounts, ordered by account code.
    pub children: Vec<AccountNode>,
}

/// Builds the account tree from a flat list.
///
/// Root accounts (no parent, or a parent not present in the list) become
/// top-level nodes. Siblings are ordered by account code at every level.
/// Assembly is iterative, so a corrupt parent chain cannot recurse
/// unboundedly; cycle members are unreachable from any root and are
/// dropped.
#[must_use]
pub fn build_tree(accounts: Vec<Account>) -> Vec<AccountNode> {
    let known: std::collections::HashSet<AccountId> = accounts.iter().map(|a| a.id).collect();

    let mut by_parent: HashMap<Option<AccountId>, Vec<Account>> = HashMap::new();
    for account in accounts {
        let key = match account.parent_account {
            Some(parent) if known.contains(&parent) => Some(parent),
            _ => None,
        };
        by_parent.entry(key).or_default().push(account);
    }
    for children in by_parent.values_mut() {
        children.sort_by(|a, b| a.account_code.cmp(&b.account_code));
    }

    let roots = by_parent.remove(&None).unwrap_or_default();
    roots
        .into_iter()
        .map(|root| attach_children(root, &mut by_parent))
        .collect()
}

fn attach_children(
    account: Account,
    by_parent: &mut HashMap<Option<AccountId>, Vec<Account>>,
) -> AccountNode {
    let children = by_parent
        .remove(&Some(account.id))
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach_children(child, by_parent))
        .collect();

    AccountNode { account, children }
}

/// Returns true if setting `new_parent` as the parent of `account_id` would
/// create a cycle in the account tree.
///
/// `parents` maps every existing account to its current parent.
#[must_use]
pub fn would_create_cycle(
    parents: &HashMap<AccountId, Option<AccountId>>,
    account_id: AccountId,
    new_parent: AccountId,
) -> bool {
    if account_id == new_parent {
        return true;
    }

    // Walk up from the proposed parent; hitting the account means the
    // account is already an ancestor of the parent.
    let mut cursor = Some(new_parent);
    let mut hops = 0usize;
    while let Some(current) = cursor {
        if current == account_id {
            return true;
        }
        hops += 1;
        if hops > parents.len() {
            // Pre-existing cycle in the chain.
            return true;
        }
        cursor = parents.get(&current).copied().flatten();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::types::{AccountStatus, AccountType, NormalBalance};
    use rust_decimal::Decimal;

    fn account(code: &str, parent: Option<AccountId>, level: i32) -> Account {
        Account {
            id: AccountId::new(),
            account_code: code.to_string(),
            account_name: format!("Account {code}"),
            account_type: AccountType::Asset,
            account_sub_type: None,
            normal_balance: NormalBalance::Debit,
            opening_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            parent_account: parent,
            level,
            is_detail_account: parent.is_some(),
            allow_manual_entry: true,
            status: AccountStatus::Active,
            removed: false,
        }
    }

    #[test]
    fn test_build_tree_nests_children_under_parents() {
        let root = account("1000", None, 1);
        let child_a = account("1010", Some(root.id), 2);
        let child_b = account("1020", Some(root.id), 2);
        let grandchild = account("1011", Some(child_a.id), 3);

        let tree = build_tree(vec![child_b, grandchild, root.clone(), child_a]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].account.id, root.id);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].account.account_code, "1010");
        assert_eq!(tree[0].children[1].account.account_code, "1020");
        assert_eq!(tree[0].children[0].children.len(), 1);
        assert_eq!(
            tree[0].children[0].children[0].account.account_code,
            "1011"
        );
    }

    #[test]
    fn test_build_tree_orders_roots_by_code() {
        let tree = build_tree(vec![
            account("4000", None, 1),
            account("1000", None, 1),
            account("2000", None, 1),
        ]);

        let codes: Vec<&str> = tree
            .iter()
            .map(|n| n.account.account_code.as_str())
            .collect();
        assert_eq!(codes, vec!["1000", "2000", "4000"]);
    }

    #[test]
    fn test_build_tree_treats_unknown_parent_as_root() {
        let orphan = account("9000", Some(AccountId::new()), 2);
        let tree = build_tree(vec![orphan]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_would_create_cycle_self_parent() {
        let id = AccountId::new();
        let parents = HashMap::from([(id, None)]);
        assert!(would_create_cycle(&parents, id, id));
    }

    #[test]
    fn test_would_create_cycle_ancestor_chain() {
        let a = AccountId::new();
        let b = AccountId::new();
        let c = AccountId::new();
        // a -> b -> c (c is root)
        let parents = HashMap::from([(a, Some(b)), (b, Some(c)), (c, None)]);

        // Reparenting c under a closes the loop.
        assert!(would_create_cycle(&parents, c, a));
        // Reparenting a under c is already the shape of the chain.
        assert!(!would_create_cycle(&parents, a, c));
    }

    #[test]
    fn test_would_create_cycle_detects_corrupt_chain() {
        let a = AccountId::new();
        let b = AccountId::new();
        let unrelated = AccountId::new();
        // a and b already point at each other.
        let parents = HashMap::from([(a, Some(b)), (b, Some(a))]);
        assert!(would_create_cycle(&parents, unrelated, a));
    }
}
