//! Built-in sample postings used to seed an empty catalog.

use crate::catalog::domain::{CatalogDomainError, NewReview, ReviewCategory, ReviewId, Reward};
use chrono::{DateTime, Duration, Utc};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

/// Returns the three sample postings, registered at `now`.
pub(super) fn sample_reviews(now: DateTime<Utc>) -> Result<Vec<NewReview>, CatalogDomainError> {
    Ok(vec![
        NewReview {
            id: ReviewId::new("review-1")?,
            business_name: "맛집카페 강남점".to_owned(),
            region: "서울 강남구".to_owned(),
            content: "새로 오픈한 카페 방문 후기 작성".to_owned(),
            full_description: "강남역 근처에 새로 오픈한 프리미엄 카페입니다. 인테리어와 커피 맛, 서비스에 대한 솔직한 후기를 작성해 주세요.".to_owned(),
            image_url: Some(
                "https://images.unsplash.com/photo-1554118811-1e0d58224f24?w=400".to_owned(),
            ),
            category: ReviewCategory::General,
            duration: "1-2시간".to_owned(),
            reward: Reward::new(15_000)?,
            registered_date: now,
            deadline: now + Duration::days(7),
            requirements: strings(&["실제 방문 필수", "음료 1잔 이상 주문", "사진 3장 이상"]),
            restrictions: strings(&["가족/지인 동반 불가", "할인 쿠폰 사용 금지"]),
            verification_method: "영수증 및 매장 내부 사진".to_owned(),
        },
        NewReview {
            id: ReviewId::new("review-2")?,
            business_name: "치킨집 홍대점".to_owned(),
            region: "서울 마포구".to_owned(),
            content: "치킨 맛집 리뷰 작성".to_owned(),
            full_description: "홍대 근처 인기 치킨집 방문 후기입니다. 맛과 양, 가격 대비 만족도를 중심으로 리뷰해 주세요.".to_owned(),
            image_url: Some(
                "https://images.unsplash.com/photo-1562967914-608f82629710?w=400".to_owned(),
            ),
            category: ReviewCategory::Premium,
            duration: "2-3시간".to_owned(),
            reward: Reward::new(25_000)?,
            registered_date: now,
            deadline: now + Duration::days(5),
            requirements: strings(&["실제 주문 및 식사", "치킨 1마리 이상 주문", "사진 5장 이상"]),
            restrictions: strings(&["배달 주문 불가", "포장 주문 불가", "매장 내 식사만 가능"]),
            verification_method: "주문 영수증 및 음식 사진".to_owned(),
        },
        NewReview {
            id: ReviewId::new("review-3")?,
            business_name: "헬스장 잠실점".to_owned(),
            region: "서울 송파구".to_owned(),
            content: "헬스장 이용 후기 작성".to_owned(),
            full_description: "잠실 롯데월드몰 근처 헬스장 1일 이용권으로 이용 후기를 작성해 주세요.".to_owned(),
            image_url: Some(
                "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400".to_owned(),
            ),
            category: ReviewCategory::General,
            duration: "2-3시간".to_owned(),
            reward: Reward::new(20_000)?,
            registered_date: now,
            deadline: now + Duration::days(10),
            requirements: strings(&["1일 이용권 구매", "실제 운동 1시간 이상", "시설 사진 촬영"]),
            restrictions: strings(&["PT 수강 불가", "락커룸 사진 촬영 금지"]),
            verification_method: "이용권 구매 영수증 및 운동 인증샷".to_owned(),
        },
    ])
}
