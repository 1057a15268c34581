//! 昵称推荐

use std::sync::Arc;

use movie_errors::AppResult;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::repositories::UserRepository;

const ADJECTIVES: &[&str] = &[
    "Happy", "Sleepy", "Brave", "Quiet", "Lucky", "Sunny", "Swift", "Clever", "Gentle", "Cosmic",
    "Golden", "Silver", "Midnight", "Velvet", "Retro",
];

const NOUNS: &[&str] = &[
    "Popcorn", "Director", "Critic", "Projector", "Reel", "Ticket", "Usher", "Matinee", "Premiere",
    "Cinephile", "Screen", "Auteur", "Stuntman", "Montage", "Cameo",
];

/// 每个推荐昵称最多尝试的候选数
const ATTEMPTS_PER_NICKNAME: usize = 10;

/// 生成一个随机候选昵称：形容词 + 名词 + 1~999 的数字
pub fn nickname_candidate() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Happy");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Popcorn");
    let number: u16 = rng.gen_range(1..=999);
    format!("{}{}{}", adjective, noun, number)
}

/// 推荐未被占用的昵称
pub struct NicknameGenerator {
    user_repo: Arc<dyn UserRepository>,
}

impl NicknameGenerator {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 最多返回 `count` 个互不相同且未被使用的昵称
    pub async fn recommend(&self, count: usize) -> AppResult<Vec<String>> {
        let mut nicknames = Vec::with_capacity(count);

        for _ in 0..count * ATTEMPTS_PER_NICKNAME {
            if nicknames.len() >= count {
                break;
            }

            let candidate = nickname_candidate();
            if nicknames.contains(&candidate) {
                continue;
            }
            if !self.user_repo.exists_by_nickname(&candidate).await? {
                nicknames.push(candidate);
            }
        }

        Ok(nicknames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_shape() {
        for _ in 0..50 {
            let candidate = nickname_candidate();
            assert!(ADJECTIVES.iter().any(|a| candidate.starts_with(a)));
            assert!(candidate.chars().last().is_some_and(|c| c.is_ascii_digit()));
            assert!(candidate.chars().count() <= 20);
        }
    }
}
