use std::io::{self, Read};
use flate2::{Compression, write::GzEncoder, read::GzDecoder};

/// 魔数常量 - 用于标识页面数据包格式
pub const MAGIC_BYTES: &[u8] = b"BLGPG"; // Blog Page bundle

/// 头部长度: 魔数 + 2字节版本号 + 4字节原始长度
pub const HEADER_LEN: usize = MAGIC_BYTES.len() + 2 + 4;

/// 容器头部信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// 版本号 [主版本, 次版本]
    pub version: [u8; 2],
    /// 解压后的原始数据大小
    pub original_size: u32,
}

/// 将对象序列化为二进制格式
pub fn to_binary<T: serde::Serialize>(obj: &T) -> Result<Vec<u8>, io::Error> {
    bincode::serde::encode_to_vec(obj, bincode::config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("序列化失败: {}", e)))
}

/// 从二进制格式反序列化对象
pub fn from_binary<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, io::Error> {
    bincode::serde::decode_from_slice(data, bincode::config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("反序列化失败: {}", e)))
        .map(|(value, _)| value)
}

/// 将对象序列化为压缩的二进制格式
pub fn to_compressed<T: serde::Serialize>(obj: &T, version: [u8; 2]) -> Result<Vec<u8>, io::Error> {
    let binary = to_binary(obj)?;

    let original_size = u32::try_from(binary.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "数据过大，无法写入容器"))?;

    let mut output = Vec::with_capacity(HEADER_LEN + binary.len() / 2);
    output.extend_from_slice(MAGIC_BYTES);
    output.extend_from_slice(&version);
    output.extend_from_slice(&original_size.to_le_bytes());

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    std::io::Write::write_all(&mut encoder, &binary)?;
    output.extend_from_slice(&encoder.finish()?);

    Ok(output)
}

/// 解析并校验容器头部
pub fn read_header(data: &[u8], max_version: u8) -> Result<ContainerHeader, io::Error> {
    if data.len() < HEADER_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("数据太短，无法解析: {} 字节", data.len())
        ));
    }

    if &data[..MAGIC_BYTES.len()] != MAGIC_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "无效的文件格式：魔数不匹配"
        ));
    }

    let version_offset = MAGIC_BYTES.len();
    let version = [data[version_offset], data[version_offset + 1]];

    // 只比较主版本号
    if version[0] > max_version {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("不支持的版本: {}.{}", version[0], version[1])
        ));
    }

    let size_offset = version_offset + 2;
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(&data[size_offset..HEADER_LEN]);

    Ok(ContainerHeader {
        version,
        original_size: u32::from_le_bytes(size_bytes),
    })
}

/// 从压缩的二进制格式反序列化对象，允许指定支持的最大版本
pub fn from_compressed_with_max_version<T: for<'a> serde::de::Deserialize<'a>>(
    data: &[u8],
    max_version: u8
) -> Result<T, io::Error> {
    let header = read_header(data, max_version)?;

    let mut decoder = GzDecoder::new(&data[HEADER_LEN..]);
    let mut decompressed_data = Vec::with_capacity(header.original_size as usize);
    decoder.read_to_end(&mut decompressed_data)?;

    if decompressed_data.len() != header.original_size as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("解压后数据大小不匹配: 期望 {} 字节, 实际 {} 字节",
                   header.original_size, decompressed_data.len())
        ));
    }

    from_binary(&decompressed_data)
}

/// 验证压缩数据是否有效，返回版本号
pub fn validate_compressed_data(data: &[u8], max_version: u8) -> Result<[u8; 2], io::Error> {
    read_header(data, max_version).map(|header| header.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        values: Vec<u32>,
        note: Option<String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "page".to_string(),
            values: vec![1, 2, 3],
            note: None,
        }
    }

    #[test]
    fn compressed_data_starts_with_header() -> Result<(), io::Error> {
        let data = to_compressed(&sample(), [1, 0])?;

        assert_eq!(&data[..MAGIC_BYTES.len()], MAGIC_BYTES);
        assert_eq!(validate_compressed_data(&data, 1)?, [1, 0]);

        let decoded: Sample = from_compressed_with_max_version(&data, 1)?;
        assert_eq!(decoded, sample());
        Ok(())
    }

    #[test]
    fn newer_major_version_is_rejected() -> Result<(), io::Error> {
        let data = to_compressed(&sample(), [2, 0])?;

        let err = from_compressed_with_max_version::<Sample>(&data, 1)
            .err()
            .map(|e| e.kind());
        assert_eq!(err, Some(io::ErrorKind::InvalidData));
        Ok(())
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut data = b"XXXXX".to_vec();
        data.extend_from_slice(&[1, 0, 0, 0, 0, 0]);

        assert!(validate_compressed_data(&data, 1).is_err());
    }

    #[test]
    fn truncated_data_is_rejected() {
        assert!(read_header(b"BLG", 1).is_err());
    }
}
