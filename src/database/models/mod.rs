pub mod news;
pub mod school;
pub mod subscription;
pub mod user;

pub use news::{ListNewsParams, NewNews, News};
pub use school::{ListSchoolsParams, NewSchool, School};
pub use subscription::{ListSubscriptionSchoolsParams, NewSubscription, Subscription, SubscriptionSchool};
pub use user::{NewUser, User, UserRow};
