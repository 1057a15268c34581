//! 电影详情（只读）

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// 上映状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovieStatus {
    ComingSoon,
    NowPlaying,
    Ended,
}

impl MovieStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComingSoon => "COMING_SOON",
            Self::NowPlaying => "NOW_PLAYING",
            Self::Ended => "ENDED",
        }
    }
}

impl FromStr for MovieStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COMING_SOON" => Ok(Self::ComingSoon),
            "NOW_PLAYING" => Ok(Self::NowPlaying),
            "ENDED" => Ok(Self::Ended),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    pub movie_cd: String,
    pub movie_nm: String,
    pub genre_nm: Option<String>,
    pub status: MovieStatus,
}

/// 重复出现的类型及其数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreCount {
    pub genre_nm: String,
    pub count: i64,
}
