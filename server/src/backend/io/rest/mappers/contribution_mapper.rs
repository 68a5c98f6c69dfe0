use crate::backend::domain::commands::contribution::{ContributionDetails, SaveContributionCommand};
use crate::backend::domain::contribution_totals::{total, CategoryTotals, ContributionTotals};
use crate::backend::domain::filters::ContributionFilter;
use crate::backend::domain::models::contribution::ContributionCategory;
use shared::{
    CategoryStat, Contribution as SharedContribution, ContributionCategory as SharedCategory,
    ContributionListQuery, ContributionListResponse, ContributionResponse, ContributionSummary,
    SaveContributionRequest,
};

/// Mapper between contribution DTOs and domain types.
pub struct ContributionMapper;

impl ContributionMapper {
    pub fn category_to_dto(category: ContributionCategory) -> SharedCategory {
        match category {
            ContributionCategory::ChandaMajlis => SharedCategory::ChandaMajlis,
            ContributionCategory::ChandaIjtema => SharedCategory::ChandaIjtema,
            ContributionCategory::TehrikEJadid => SharedCategory::TehrikEJadid,
            ContributionCategory::WaqfEJadid => SharedCategory::WaqfEJadid,
            ContributionCategory::Publication => SharedCategory::Publication,
            ContributionCategory::KhidmatEKhalq => SharedCategory::KhidmatEKhalq,
            ContributionCategory::AnsarProject => SharedCategory::AnsarProject,
        }
    }

    pub fn to_command(request: SaveContributionRequest) -> SaveContributionCommand {
        SaveContributionCommand {
            participant_id: request.participant_id,
            month: request.month,
            chanda_majlis: request.chanda_majlis,
            chanda_ijtema: request.chanda_ijtema,
            tehrik_e_jadid: request.tehrik_e_jadid,
            waqf_e_jadid: request.waqf_e_jadid,
            publication: request.publication,
            khidmat_e_khalq: request.khidmat_e_khalq,
            ansar_project: request.ansar_project,
        }
    }

    pub fn to_filter(query: ContributionListQuery) -> ContributionFilter {
        ContributionFilter {
            search: query.search,
            month: query.month,
        }
    }

    pub fn to_dto(details: ContributionDetails) -> SharedContribution {
        let contribution = details.contribution;
        SharedContribution {
            total: total(&contribution),
            id: contribution.id,
            participant_id: contribution.participant_id,
            participant_name: details.participant_name,
            month: contribution.month,
            chanda_majlis: contribution.chanda_majlis,
            chanda_ijtema: contribution.chanda_ijtema,
            tehrik_e_jadid: contribution.tehrik_e_jadid,
            waqf_e_jadid: contribution.waqf_e_jadid,
            publication: contribution.publication,
            khidmat_e_khalq: contribution.khidmat_e_khalq,
            ansar_project: contribution.ansar_project,
            created_at: contribution.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_dto(contributions: Vec<ContributionDetails>) -> ContributionListResponse {
        ContributionListResponse {
            contributions: contributions.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_response(details: ContributionDetails, message: &str) -> ContributionResponse {
        ContributionResponse {
            contribution: Self::to_dto(details),
            success_message: message.to_string(),
        }
    }

    fn category_stat(totals: CategoryTotals) -> CategoryStat {
        CategoryStat {
            average: totals.average(),
            category: Self::category_to_dto(totals.category),
            label: totals.category.label().to_string(),
            payers: totals.payers,
            total_amount: totals.total_amount,
        }
    }

    pub fn to_summary_dto(totals: ContributionTotals) -> ContributionSummary {
        ContributionSummary {
            record_count: totals.record_count,
            total_amount: totals.total_amount,
            total_contributors: totals.total_contributors,
            categories: totals.categories.into_iter().map(Self::category_stat).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_stat_without_payers_has_no_average() {
        let stat = ContributionMapper::category_stat(CategoryTotals {
            category: ContributionCategory::WaqfEJadid,
            payers: 0,
            total_amount: 0.0,
        });
        assert_eq!(stat.category, SharedCategory::WaqfEJadid);
        assert_eq!(stat.label, "Waqf-e-Jadid");
        assert_eq!(stat.average, None);
    }
}
