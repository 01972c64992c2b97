//! Deterministic demo dataset for the in-memory backend.
//!
//! Values are derived from the record index alone, so repeated runs (and
//! tests) see the same dataset. The shape matches production records; the
//! contents are placeholders.

use chrono::{DateTime, Duration, Utc};

use crate::types::{Education, Guarantor, Profile, Socials, User, UserStatus};

const ORGANIZATIONS: &[&str] = &["Lendsqr", "Irorun", "Lendstar", "Lendly", "Lendwise"];

const STATUSES: &[UserStatus] = &[
  UserStatus::Active,
  UserStatus::Inactive,
  UserStatus::Pending,
  UserStatus::Blacklisted,
];

const SECTORS: &[&str] = &[
  "FinTech",
  "Banking",
  "Insurance",
  "Real Estate",
  "Healthcare",
  "Education",
];

// Days from the Unix epoch to 2020-01-01; joins spread forward from there.
const JOIN_EPOCH_DAYS: i64 = 18_262;

/// Build `count` demo users, ids `user_1` through `user_<count>`.
pub fn demo_users(count: usize) -> Vec<User> {
  (1..=count).map(demo_user).collect()
}

fn demo_user(i: usize) -> User {
  let organization = ORGANIZATIONS[i % ORGANIZATIONS.len()];
  let first_name = format!("User{}", i);
  let last_name = format!("LastName{}", i);

  User {
    id: format!("user_{}", i),
    organization: organization.to_string(),
    username: format!("{} {}", first_name, last_name),
    email: format!("user{}@{}.com", i, organization.to_lowercase()),
    phone_number: format!("080{:08}", i),
    date_joined: join_date(i),
    status: STATUSES[i % STATUSES.len()],
    profile: Profile {
      first_name: first_name.clone(),
      last_name,
      avatar: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", first_name),
      bvn: format!("070{:08}", i),
      gender: if i % 2 == 0 { "male" } else { "female" }.to_string(),
      marital_status: ["single", "married", "divorced", "widowed"][i % 4].to_string(),
      children: if i % 3 == 0 {
        "None".to_string()
      } else {
        (i % 3).to_string()
      },
      type_of_residence: if i % 2 == 0 {
        "Parent's Apartment"
      } else {
        "Personal Apartment"
      }
      .to_string(),
    },
    education: Education {
      level: ["B.Sc", "M.Sc", "Ph.D"][i % 3].to_string(),
      employment_status: "Employed".to_string(),
      sector: SECTORS[i % SECTORS.len()].to_string(),
      duration: format!("{} years", i % 5 + 1),
      office_email: format!("office{}@company.com", i),
      monthly_income: format!("\u{20a6}{}00,000.00 - \u{20a6}{}00,000.00", i % 4 + 1, i % 4 + 5),
      loan_repayment: format!("{}0,000", i % 9 + 1),
    },
    socials: Socials {
      twitter: format!("@{}", first_name.to_lowercase()),
      facebook: format!("{} LastName{}", first_name, i),
      instagram: format!("@{}", first_name.to_lowercase()),
    },
    guarantors: vec![
      Guarantor {
        full_name: format!("Guarantor {}", i),
        phone_number: format!("081{:08}", i),
        email_address: format!("guarantor{}@email.com", i),
        relationship: if i % 2 == 0 { "Sister" } else { "Brother" }.to_string(),
      },
      Guarantor {
        full_name: format!("Guarantor {}", i + 1),
        phone_number: format!("082{:08}", i),
        email_address: format!("guarantor{}@email.com", i + 1),
        relationship: "Friend".to_string(),
      },
    ],
  }
}

/// Join dates step one day per record through 2020, wrapping at year end.
fn join_date(i: usize) -> DateTime<Utc> {
  DateTime::UNIX_EPOCH + Duration::days(JOIN_EPOCH_DAYS + (i % 365) as i64)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_are_unique() {
    let users = demo_users(100);
    let mut ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);
  }

  #[test]
  fn dataset_is_deterministic() {
    assert_eq!(demo_users(20), demo_users(20));
  }

  #[test]
  fn every_user_has_guarantors() {
    assert!(demo_users(50).iter().all(|u| !u.guarantors.is_empty()));
  }
}
