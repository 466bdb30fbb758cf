pub mod article;
pub mod comment;
pub mod events;
pub mod follow;
pub mod like;
pub mod notice;
pub mod notification;
pub mod property;
pub mod view;

pub use article::ArticleService;
pub use comment::CommentService;
pub use events::{BoundedEventChannel, DeliveryEvent, EventChannel, NOTIFICATION_TOPIC};
pub use follow::FollowService;
pub use like::LikeService;
pub use notice::NoticeService;
pub use notification::NotificationService;
pub use property::PropertyService;
pub use view::ViewService;
