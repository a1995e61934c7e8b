mod session_dto;

pub use session_dto::{LoginRequestDto, LoginResponseDto, MeResponseDto};
