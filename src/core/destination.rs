use crate::domain::model::{Branch, Company, DestinationId, ReportGrouper};

/// Display name used when neither the branch nor its company has one.
pub const UNNAMED_BRANCH: &str = "SIN SUCURSAL";

/// Where a label destination comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationSource<'a> {
    Grouper(&'a ReportGrouper),
    Branch {
        branch: &'a Branch,
        company: Option<&'a Company>,
    },
}

impl DestinationSource<'_> {
    pub fn id(&self) -> DestinationId {
        match self {
            DestinationSource::Grouper(grouper) => format!("grouper_{}", grouper.id),
            DestinationSource::Branch { branch, .. } => format!("branch_{}", branch.id),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            DestinationSource::Grouper(grouper) => grouper.name.clone(),
            DestinationSource::Branch { branch, company } => branch
                .fantasy_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .or(company.map(|c| c.name.as_str()))
                .unwrap_or(UNNAMED_BRANCH)
                .to_string(),
        }
    }
}

/// Maps an order's branch and company to the destination its labels are printed for.
#[derive(Debug, Clone, Default)]
pub struct DestinationResolver {
    groupers: Vec<ReportGrouper>,
}

impl DestinationResolver {
    /// Keeps active groupers only, in `display_order`.
    pub fn new(groupers: impl IntoIterator<Item = ReportGrouper>) -> Self {
        let mut groupers: Vec<ReportGrouper> =
            groupers.into_iter().filter(|g| g.is_active).collect();
        groupers.sort_by_key(|g| g.display_order);
        Self { groupers }
    }

    /// A grouper holding the branch wins over one holding the company;
    /// without either the branch itself is the destination.
    pub fn resolve<'a>(&'a self, branch: &'a Branch, company: Option<&'a Company>) -> DestinationSource<'a> {
        if let Some(grouper) = self.groupers.iter().find(|g| g.branch_ids.contains(&branch.id)) {
            return DestinationSource::Grouper(grouper);
        }

        if let Some(company) = company {
            if let Some(grouper) = self
                .groupers
                .iter()
                .find(|g| g.company_ids.contains(&company.id))
            {
                return DestinationSource::Grouper(grouper);
            }
        }

        DestinationSource::Branch { branch, company }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouper(id: u64, order: u32, branches: Vec<u64>, companies: Vec<u64>) -> ReportGrouper {
        ReportGrouper {
            id,
            name: format!("Grupo {}", id),
            display_order: order,
            is_active: true,
            branch_ids: branches,
            company_ids: companies,
        }
    }

    fn branch(id: u64, name: Option<&str>) -> Branch {
        Branch {
            id,
            company_id: 1,
            fantasy_name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_branch_grouper_wins_over_company_grouper() {
        let resolver = DestinationResolver::new(vec![
            grouper(1, 1, vec![], vec![1]),
            grouper(2, 2, vec![10], vec![]),
        ]);
        let company = Company { id: 1, name: "ACME".to_string() };
        let branch = branch(10, Some("Casa Matriz"));

        let destination = resolver.resolve(&branch, Some(&company));

        assert_eq!(destination.id(), "grouper_2");
        assert_eq!(destination.display_name(), "Grupo 2");
    }

    #[test]
    fn test_company_grouper_used_when_branch_not_grouped() {
        let resolver = DestinationResolver::new(vec![grouper(1, 1, vec![], vec![1])]);
        let company = Company { id: 1, name: "ACME".to_string() };
        let branch = branch(10, None);

        assert_eq!(resolver.resolve(&branch, Some(&company)).id(), "grouper_1");
    }

    #[test]
    fn test_falls_back_to_branch_names() {
        let resolver = DestinationResolver::default();
        let company = Company { id: 1, name: "ACME".to_string() };

        let named = branch(10, Some("Sucursal Norte"));
        let unnamed = branch(11, None);

        assert_eq!(resolver.resolve(&named, Some(&company)).id(), "branch_10");
        assert_eq!(resolver.resolve(&named, Some(&company)).display_name(), "Sucursal Norte");
        assert_eq!(resolver.resolve(&unnamed, Some(&company)).display_name(), "ACME");
        assert_eq!(resolver.resolve(&unnamed, None).display_name(), UNNAMED_BRANCH);
    }

    #[test]
    fn test_inactive_groupers_ignored_and_display_order_respected() {
        let mut inactive = grouper(1, 0, vec![10], vec![]);
        inactive.is_active = false;
        let resolver = DestinationResolver::new(vec![
            inactive,
            grouper(3, 5, vec![10], vec![]),
            grouper(2, 2, vec![10], vec![]),
        ]);

        assert_eq!(resolver.resolve(&branch(10, None), None).id(), "grouper_2");
    }
}
