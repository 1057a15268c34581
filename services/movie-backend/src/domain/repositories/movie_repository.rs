//! 电影详情 Repository trait（只读）

use async_trait::async_trait;
use movie_errors::AppResult;

use crate::domain::entities::{GenreCount, MovieDetail, MovieStatus};

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// 按电影代码精确查找
    async fn find_by_movie_cd(&self, movie_cd: &str) -> AppResult<Option<MovieDetail>>;

    /// 片名包含子串（区分大小写），返回电影代码最小的一条
    async fn find_by_movie_nm_containing(&self, fragment: &str) -> AppResult<Option<MovieDetail>>;

    async fn find_by_status(&self, status: MovieStatus) -> AppResult<Vec<MovieDetail>>;

    /// 片名包含子串（不区分大小写）
    async fn find_by_movie_nm_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> AppResult<Vec<MovieDetail>>;

    async fn find_by_genre_nm_containing(&self, fragment: &str) -> AppResult<Vec<MovieDetail>>;

    /// 出现超过一次的类型，按数量降序
    async fn find_duplicate_genres(&self) -> AppResult<Vec<GenreCount>>;

    async fn find_by_exact_genre_nm(&self, genre_nm: &str) -> AppResult<Vec<MovieDetail>>;
}
