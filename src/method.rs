use std::fmt;
use std::str::FromStr;

/// Known JSON API v4 method names
///
/// All methods go through [`DirectClient::call`](crate::DirectClient::call);
/// this enum only exists so callers don't have to spell names by hand.
/// Any string is accepted by `call`, including methods not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    // Campaigns
    ArchiveCampaign,
    CreateOrUpdateCampaign,
    DeleteCampaign,
    GetCampaignParams,
    GetCampaignsList,
    GetCampaignsListFilter,
    GetCampaignsParams,
    ResumeCampaign,
    StopCampaign,
    UnArchiveCampaign,

    // Banners
    ArchiveBanners,
    CreateOrUpdateBanners,
    DeleteBanners,
    GetBanners,
    GetBannerPhrases,
    GetBannerPhrasesFilter,
    ModerateBanners,
    ResumeBanners,
    StopBanners,
    UnArchiveBanners,

    // Prices
    SetAutoPrice,
    UpdatePrices,

    // Statistics, reports and forecasts
    GetBalance,
    GetSummaryStat,
    CreateNewReport,
    DeleteReport,
    GetReportList,
    CreateNewWordstatReport,
    DeleteWordstatReport,
    GetWordstatReport,
    GetWordstatReportList,
    CreateNewForecast,
    DeleteForecastReport,
    GetForecast,
    GetForecastList,

    // Clients
    CreateNewSubclient,
    GetClientInfo,
    GetClientsList,
    GetClientsUnits,
    GetSubClients,
    UpdateClientInfo,

    // Reference data
    GetAvailableVersions,
    GetChanges,
    GetRegions,
    GetRubrics,
    GetStatGoals,
    GetTimeZones,
    GetVersion,
    PingApi,
}

impl Method {
    /// Every known method
    pub const ALL: [Method; 49] = [
        Method::ArchiveCampaign,
        Method::CreateOrUpdateCampaign,
        Method::DeleteCampaign,
        Method::GetCampaignParams,
        Method::GetCampaignsList,
        Method::GetCampaignsListFilter,
        Method::GetCampaignsParams,
        Method::ResumeCampaign,
        Method::StopCampaign,
        Method::UnArchiveCampaign,
        Method::ArchiveBanners,
        Method::CreateOrUpdateBanners,
        Method::DeleteBanners,
        Method::GetBanners,
        Method::GetBannerPhrases,
        Method::GetBannerPhrasesFilter,
        Method::ModerateBanners,
        Method::ResumeBanners,
        Method::StopBanners,
        Method::UnArchiveBanners,
        Method::SetAutoPrice,
        Method::UpdatePrices,
        Method::GetBalance,
        Method::GetSummaryStat,
        Method::CreateNewReport,
        Method::DeleteReport,
        Method::GetReportList,
        Method::CreateNewWordstatReport,
        Method::DeleteWordstatReport,
        Method::GetWordstatReport,
        Method::GetWordstatReportList,
        Method::CreateNewForecast,
        Method::DeleteForecastReport,
        Method::GetForecast,
        Method::GetForecastList,
        Method::CreateNewSubclient,
        Method::GetClientInfo,
        Method::GetClientsList,
        Method::GetClientsUnits,
        Method::GetSubClients,
        Method::UpdateClientInfo,
        Method::GetAvailableVersions,
        Method::GetChanges,
        Method::GetRegions,
        Method::GetRubrics,
        Method::GetStatGoals,
        Method::GetTimeZones,
        Method::GetVersion,
        Method::PingApi,
    ];

    /// Wire name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            Method::ArchiveCampaign => "ArchiveCampaign",
            Method::CreateOrUpdateCampaign => "CreateOrUpdateCampaign",
            Method::DeleteCampaign => "DeleteCampaign",
            Method::GetCampaignParams => "GetCampaignParams",
            Method::GetCampaignsList => "GetCampaignsList",
            Method::GetCampaignsListFilter => "GetCampaignsListFilter",
            Method::GetCampaignsParams => "GetCampaignsParams",
            Method::ResumeCampaign => "ResumeCampaign",
            Method::StopCampaign => "StopCampaign",
            Method::UnArchiveCampaign => "UnArchiveCampaign",
            Method::ArchiveBanners => "ArchiveBanners",
            Method::CreateOrUpdateBanners => "CreateOrUpdateBanners",
            Method::DeleteBanners => "DeleteBanners",
            Method::GetBanners => "GetBanners",
            Method::GetBannerPhrases => "GetBannerPhrases",
            Method::GetBannerPhrasesFilter => "GetBannerPhrasesFilter",
            Method::ModerateBanners => "ModerateBanners",
            Method::ResumeBanners => "ResumeBanners",
            Method::StopBanners => "StopBanners",
            Method::UnArchiveBanners => "UnArchiveBanners",
            Method::SetAutoPrice => "SetAutoPrice",
            Method::UpdatePrices => "UpdatePrices",
            Method::GetBalance => "GetBalance",
            Method::GetSummaryStat => "GetSummaryStat",
            Method::CreateNewReport => "CreateNewReport",
            Method::DeleteReport => "DeleteReport",
            Method::GetReportList => "GetReportList",
            Method::CreateNewWordstatReport => "CreateNewWordstatReport",
            Method::DeleteWordstatReport => "DeleteWordstatReport",
            Method::GetWordstatReport => "GetWordstatReport",
            Method::GetWordstatReportList => "GetWordstatReportList",
            Method::CreateNewForecast => "CreateNewForecast",
            Method::DeleteForecastReport => "DeleteForecastReport",
            Method::GetForecast => "GetForecast",
            Method::GetForecastList => "GetForecastList",
            Method::CreateNewSubclient => "CreateNewSubclient",
            Method::GetClientInfo => "GetClientInfo",
            Method::GetClientsList => "GetClientsList",
            Method::GetClientsUnits => "GetClientsUnits",
            Method::GetSubClients => "GetSubClients",
            Method::UpdateClientInfo => "UpdateClientInfo",
            Method::GetAvailableVersions => "GetAvailableVersions",
            Method::GetChanges => "GetChanges",
            Method::GetRegions => "GetRegions",
            Method::GetRubrics => "GetRubrics",
            Method::GetStatGoals => "GetStatGoals",
            Method::GetTimeZones => "GetTimeZones",
            Method::GetVersion => "GetVersion",
            Method::PingApi => "PingAPI",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Error returned when a name doesn't match any known method
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown API method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    /// Accepts the wire name or its lower-camel form (`getBalance`)
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let mut chars = name.chars();
        let wire_name: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Method::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == wire_name)
            .ok_or_else(|| UnknownMethod(name.to_string()))
    }
}
