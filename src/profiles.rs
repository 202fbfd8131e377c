use crate::codecs::Codec;

// ref. https://trac.ffmpeg.org/wiki/Encode/AV1#SVT-AV1
const AV1_VIDEO_PARAMETERS: &[&str] = &[
    "-c:v", "libsvtav1",
    "-pix_fmt", "yuv420p",
    "-crf", "45",
    "-preset", "7",
    "-svtav1-params", "fast-decode=1:film-grain=7:tune=0",
];

// ref. https://trac.ffmpeg.org/wiki/Encode/H.264
const H264_VIDEO_PARAMETERS: &[&str] = &[
    "-c:v", "libx264",
    "-pix_fmt", "yuv420p",
    "-profile:v", "high",
    "-level", "4.1",
    "-preset", "slower",
    "-crf", "25",
    "-tune", "film",
];

// Still encoded by libx264, only the profile and crf differ from h264.
const HEVC_VIDEO_PARAMETERS: &[&str] = &[
    "-c:v", "libx264",
    "-pix_fmt", "yuv420p",
    "-profile:v", "main",
    "-preset", "slower",
    "-crf", "23",
    "-tune", "film",
];

// ref. https://trac.ffmpeg.org/wiki/Encode/AAC#fdk_aac
const HE_AAC_AUDIO_PARAMETERS: &[&str] = &["-c:a", "libfdk_aac", "-b:a", "128k"];

// -vf/-af/-filter and -filter_complex cannot be used together for the same stream.
const FILTER_PARAMETERS: &[&str] = &["-movflags", "+faststart"];

/// Ordered flag tokens for one encoder configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecProfile {
    flags: Vec<String>,
}

impl CodecProfile {
    fn from_static(flags: &[&str]) -> Self {
        CodecProfile {
            flags: flags.iter().map(|s| String::from(*s)).collect(),
        }
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }
}

/// Every flag set used to build an invocation. Built once in `main`.
#[derive(Clone, Debug)]
pub struct ProfileTable {
    av1: CodecProfile,
    h264: CodecProfile,
    hevc: CodecProfile,
    audio: CodecProfile,
    filters: CodecProfile,
}

impl ProfileTable {
    pub fn standard() -> Self {
        ProfileTable {
            av1: CodecProfile::from_static(AV1_VIDEO_PARAMETERS),
            h264: CodecProfile::from_static(H264_VIDEO_PARAMETERS),
            hevc: CodecProfile::from_static(HEVC_VIDEO_PARAMETERS),
            audio: CodecProfile::from_static(HE_AAC_AUDIO_PARAMETERS),
            filters: CodecProfile::from_static(FILTER_PARAMETERS),
        }
    }

    pub fn video(&self, codec: Codec) -> &CodecProfile {
        match codec {
            Codec::AV1 => &self.av1,
            Codec::H264 => &self.h264,
            Codec::HEVC => &self.hevc,
        }
    }

    pub fn audio(&self) -> &CodecProfile {
        &self.audio
    }

    pub fn filters(&self) -> &CodecProfile {
        &self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(profile: &CodecProfile) -> String {
        profile.flags().join(" ")
    }

    #[test]
    fn test_video_profiles() {
        let table = ProfileTable::standard();
        assert_eq!(
            joined(table.video(Codec::AV1)),
            "-c:v libsvtav1 -pix_fmt yuv420p -crf 45 -preset 7 -svtav1-params fast-decode=1:film-grain=7:tune=0"
        );
        assert_eq!(
            joined(table.video(Codec::H264)),
            "-c:v libx264 -pix_fmt yuv420p -profile:v high -level 4.1 -preset slower -crf 25 -tune film"
        );
        assert_eq!(
            joined(table.video(Codec::HEVC)),
            "-c:v libx264 -pix_fmt yuv420p -profile:v main -preset slower -crf 23 -tune film"
        );
    }

    #[test]
    fn test_shared_profiles() {
        let table = ProfileTable::standard();
        assert_eq!(joined(table.audio()), "-c:a libfdk_aac -b:a 128k");
        assert_eq!(joined(table.filters()), "-movflags +faststart");
    }

    #[test]
    fn test_profiles_are_distinct() {
        let table = ProfileTable::standard();
        assert_ne!(table.video(Codec::AV1), table.video(Codec::H264));
        assert_ne!(table.video(Codec::H264), table.video(Codec::HEVC));
        assert_ne!(table.video(Codec::AV1), table.video(Codec::HEVC));
    }
}
