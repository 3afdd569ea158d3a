use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse skill tier shown next to a user's name. Cosmetic only - it carries
/// no permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Beginner,
    D,
    C,
    B,
    A,
    S,
}

impl Default for Rank {
    fn default() -> Self {
        Rank::Beginner
    }
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Beginner => "Beginner",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(Rank::Beginner),
            "D" => Some(Rank::D),
            "C" => Some(Rank::C),
            "B" => Some(Rank::B),
            "A" => Some(Rank::A),
            "S" => Some(Rank::S),
            _ => None,
        }
    }
}

/// User entity - a member who teaches some skills and learns others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub rank: Rank,
    pub skills_to_teach: Vec<String>,
    pub skills_to_learn: Vec<String>,
    pub currently_learning: Option<String>,
    /// Opt-in flag for the matching workflow. Cleared on both parties when a
    /// pairing is claimed.
    pub is_finding_match: bool,
    pub is_verified: bool,
    pub verify_token: Option<String>,
    pub verify_token_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new unverified user with generated ID, verification token and
    /// timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            rank: Rank::default(),
            skills_to_teach: Vec::new(),
            skills_to_learn: Vec::new(),
            currently_learning: None,
            is_finding_match: false,
            is_verified: false,
            verify_token: Some(Uuid::new_v4().to_string()),
            verify_token_expires: Some(now + TimeDelta::hours(24)),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `other` can teach what this user is currently learning, and
    /// this user can teach what `other` is currently learning. Both sides of
    /// the check must hold for a pairing.
    pub fn is_complementary_with(&self, other: &User) -> bool {
        let wants = match self.currently_learning.as_deref() {
            Some(skill) => skill,
            None => return false,
        };
        let other_wants = match other.currently_learning.as_deref() {
            Some(skill) => skill,
            None => return false,
        };

        other.skills_to_teach.iter().any(|s| s == wants)
            && self.skills_to_teach.iter().any(|s| s == other_wants)
    }

    /// Whether the verification token matches and has not expired at `now`.
    pub fn verification_token_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.verify_token, self.verify_token_expires) {
            (Some(stored), Some(expires)) => stored == token && now <= expires,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_skills(teach: &[&str], learning: Option<&str>) -> User {
        let mut user = User::new(
            "tester".to_string(),
            "tester@example.com".to_string(),
            "hash".to_string(),
        );
        user.skills_to_teach = teach.iter().map(|s| s.to_string()).collect();
        user.currently_learning = learning.map(String::from);
        user
    }

    #[test]
    fn complementary_pair_matches_both_ways() {
        let a = user_with_skills(&["React"], Some("Python"));
        let b = user_with_skills(&["Python"], Some("React"));

        assert!(a.is_complementary_with(&b));
        assert!(b.is_complementary_with(&a));
    }

    #[test]
    fn one_sided_overlap_does_not_match() {
        // B teaches what A wants, but A teaches nothing B wants.
        let a = user_with_skills(&["Go"], Some("Python"));
        let b = user_with_skills(&["Python"], Some("React"));

        assert!(!a.is_complementary_with(&b));
    }

    #[test]
    fn no_learning_target_never_matches() {
        let a = user_with_skills(&["React"], None);
        let b = user_with_skills(&["Python"], Some("React"));

        assert!(!a.is_complementary_with(&b));
        assert!(!b.is_complementary_with(&a));
    }

    #[test]
    fn expired_verification_token_is_rejected() {
        let mut user = user_with_skills(&[], None);
        user.verify_token = Some("tok".to_string());
        user.verify_token_expires = Some(Utc::now() - TimeDelta::hours(1));

        assert!(!user.verification_token_valid("tok", Utc::now()));
    }

    #[test]
    fn rank_round_trips_through_strings() {
        for rank in [Rank::Beginner, Rank::D, Rank::C, Rank::B, Rank::A, Rank::S] {
            assert_eq!(Rank::parse(rank.as_str()), Some(rank));
        }
        assert_eq!(Rank::parse("SS"), None);
    }
}
