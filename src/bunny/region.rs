use serde::Serialize;
use std::fmt;

/// 默认区域（Falkenstein）的主机名
pub const DEFAULT_HOSTNAME: &str = "storage.bunnycdn.com";

/// 存储区所在区域。
///
/// 区域集合是封闭的，未知的区域名称回退到 [`Region::Falkenstein`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Region {
    #[default]
    #[serde(rename = "Falkenstein")]
    Falkenstein,
    #[serde(rename = "New York")]
    NewYork,
    #[serde(rename = "Los Angeles")]
    LosAngeles,
    #[serde(rename = "Singapore")]
    Singapore,
    #[serde(rename = "Sydney")]
    Sydney,
}

impl Region {
    /// 所有区域，顺序与节点参数中的选项一致
    pub const ALL: [Region; 5] = [
        Region::Falkenstein,
        Region::NewYork,
        Region::LosAngeles,
        Region::Singapore,
        Region::Sydney,
    ];

    /// 节点界面中显示的区域名称
    pub fn label(self) -> &'static str {
        match self {
            Region::Falkenstein => "Falkenstein",
            Region::NewYork => "New York",
            Region::LosAngeles => "Los Angeles",
            Region::Singapore => "Singapore",
            Region::Sydney => "Sydney",
        }
    }

    /// 区域对应的存储 API 主机名
    pub fn hostname(self) -> &'static str {
        match self {
            Region::Falkenstein => DEFAULT_HOSTNAME,
            Region::NewYork => "ny.storage.bunnycdn.com",
            Region::LosAngeles => "la.storage.bunnycdn.com",
            Region::Singapore => "sg.storage.bunnycdn.com",
            Region::Sydney => "syd.storage.bunnycdn.com",
        }
    }

    /// 按名称精确匹配区域。
    pub fn from_label(label: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|region| region.label() == label)
    }

    /// 按名称匹配区域，未知名称回退到默认区域。
    ///
    /// # 参数
    ///
    /// * `label` - 节点参数中的区域名称。
    ///
    /// # 返回值
    ///
    /// 匹配的区域，匹配失败时返回 `Region::Falkenstein`
    pub fn from_label_or_default(label: &str) -> Region {
        Region::from_label(label).unwrap_or_else(|| {
            tracing::debug!("未知区域 {:?}，使用默认区域", label);
            Region::default()
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
