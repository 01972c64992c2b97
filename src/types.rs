//! Core data types for the user directory.
//!
//! The directory treats every field as opaque; no validation or
//! normalization happens below the presentation layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
  Active,
  Inactive,
  Pending,
  Blacklisted,
}

impl UserStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      UserStatus::Active => "active",
      UserStatus::Inactive => "inactive",
      UserStatus::Pending => "pending",
      UserStatus::Blacklisted => "blacklisted",
    }
  }
}

impl std::fmt::Display for UserStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for UserStatus {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "active" => Ok(UserStatus::Active),
      "inactive" => Ok(UserStatus::Inactive),
      "pending" => Ok(UserStatus::Pending),
      "blacklisted" => Ok(UserStatus::Blacklisted),
      _ => Err(()),
    }
  }
}

/// Personal profile section of a user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub first_name: String,
  pub last_name: String,
  pub avatar: String,
  pub bvn: String,
  pub gender: String,
  pub marital_status: String,
  pub children: String,
  pub type_of_residence: String,
}

/// Education and employment section of a user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
  pub level: String,
  pub employment_status: String,
  pub sector: String,
  pub duration: String,
  pub office_email: String,
  pub monthly_income: String,
  pub loan_repayment: String,
}

/// Social media handles attached to a user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
  pub twitter: String,
  pub facebook: String,
  pub instagram: String,
}

/// Guarantor on a user's loan profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guarantor {
  pub full_name: String,
  pub phone_number: String,
  pub email_address: String,
  pub relationship: String,
}

/// Full user record as served by the directory backend.
///
/// `id` is unique across the dataset and immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub organization: String,
  pub username: String,
  pub email: String,
  pub phone_number: String,
  pub date_joined: DateTime<Utc>,
  pub status: UserStatus,
  pub profile: Profile,
  pub education: Education,
  pub socials: Socials,
  pub guarantors: Vec<Guarantor>,
}

/// Sparse filter set for the user list.
///
/// Absent fields impose no constraint; an empty set matches the whole
/// dataset. Present filters combine as a logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilters {
  /// Case-insensitive substring match on organization
  pub organization: Option<String>,
  /// Case-insensitive substring match on username
  pub username: Option<String>,
  /// Case-insensitive substring match on email
  pub email: Option<String>,
  /// Plain substring match on phone number
  pub phone_number: Option<String>,
  /// Exact status match
  pub status: Option<UserStatus>,
  /// Calendar-day match on the join timestamp, ignoring time of day
  pub date: Option<NaiveDate>,
}

impl UserFilters {
  pub fn is_empty(&self) -> bool {
    self.organization.is_none()
      && self.username.is_none()
      && self.email.is_none()
      && self.phone_number.is_none()
      && self.status.is_none()
      && self.date.is_none()
  }

  /// Whether a user satisfies every filter present in this set.
  pub fn matches(&self, user: &User) -> bool {
    if let Some(org) = &self.organization {
      if !contains_ci(&user.organization, org) {
        return false;
      }
    }
    if let Some(username) = &self.username {
      if !contains_ci(&user.username, username) {
        return false;
      }
    }
    if let Some(email) = &self.email {
      if !contains_ci(&user.email, email) {
        return false;
      }
    }
    if let Some(phone) = &self.phone_number {
      if !user.phone_number.contains(phone.as_str()) {
        return false;
      }
    }
    if let Some(status) = self.status {
      if user.status != status {
        return false;
      }
    }
    if let Some(date) = self.date {
      if user.date_joined.date_naive() != date {
        return false;
      }
    }
    true
  }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Paginated response envelope.
///
/// `total` counts filter-matching records before pagination; `items`
/// preserves the dataset's insertion order and never exceeds `limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub total: usize,
  pub page: usize,
  pub limit: usize,
  pub total_pages: usize,
}

/// Aggregate statistics over the full dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
  pub total_users: usize,
  pub active_users: usize,
  pub users_with_loans: usize,
  pub users_with_savings: usize,
}

/// Authenticated operator identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
  pub id: String,
  pub email: String,
  pub name: String,
  pub avatar: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn sample_user() -> User {
    User {
      id: "user_1".to_string(),
      organization: "Lendsqr".to_string(),
      username: "Ada Balogun".to_string(),
      email: "ada@lendsqr.com".to_string(),
      phone_number: "08012345678".to_string(),
      date_joined: Utc.with_ymd_and_hms(2020, 4, 10, 14, 25, 0).unwrap(),
      status: UserStatus::Active,
      profile: Profile {
        first_name: "Ada".to_string(),
        last_name: "Balogun".to_string(),
        avatar: String::new(),
        bvn: "07012345678".to_string(),
        gender: "female".to_string(),
        marital_status: "single".to_string(),
        children: "None".to_string(),
        type_of_residence: "Personal Apartment".to_string(),
      },
      education: Education {
        level: "B.Sc".to_string(),
        employment_status: "Employed".to_string(),
        sector: "FinTech".to_string(),
        duration: "2 years".to_string(),
        office_email: "ada@work.com".to_string(),
        monthly_income: "200,000 - 400,000".to_string(),
        loan_repayment: "40,000".to_string(),
      },
      socials: Socials {
        twitter: "@ada".to_string(),
        facebook: "Ada Balogun".to_string(),
        instagram: "@ada".to_string(),
      },
      guarantors: vec![Guarantor {
        full_name: "Debby Ogana".to_string(),
        phone_number: "08160000000".to_string(),
        email_address: "debby@gmail.com".to_string(),
        relationship: "Sister".to_string(),
      }],
    }
  }

  #[test]
  fn empty_filter_set_matches_everything() {
    let filters = UserFilters::default();
    assert!(filters.is_empty());
    assert!(filters.matches(&sample_user()));
  }

  #[test]
  fn substring_filters_are_case_insensitive() {
    let filters = UserFilters {
      organization: Some("LENDS".to_string()),
      username: Some("balogun".to_string()),
      ..Default::default()
    };
    assert!(filters.matches(&sample_user()));
  }

  #[test]
  fn filters_combine_as_and() {
    let filters = UserFilters {
      organization: Some("Lendsqr".to_string()),
      status: Some(UserStatus::Inactive),
      ..Default::default()
    };
    // Organization matches but status does not
    assert!(!filters.matches(&sample_user()));
  }

  #[test]
  fn date_filter_ignores_time_of_day() {
    let filters = UserFilters {
      date: NaiveDate::from_ymd_opt(2020, 4, 10),
      ..Default::default()
    };
    assert!(filters.matches(&sample_user()));

    let off_by_one = UserFilters {
      date: NaiveDate::from_ymd_opt(2020, 4, 11),
      ..Default::default()
    };
    assert!(!off_by_one.matches(&sample_user()));
  }

  #[test]
  fn status_parses_from_lowercase() {
    assert_eq!("active".parse(), Ok(UserStatus::Active));
    assert_eq!("blacklisted".parse(), Ok(UserStatus::Blacklisted));
    assert!("Active".parse::<UserStatus>().is_err());
  }
}
